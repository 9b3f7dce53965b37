use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{GlotError, Result};

fn default_latency_floor_ms() -> u64 {
    100
}

fn default_debounce_ms() -> u64 {
    400
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub local: LocalConfig,
    pub live: LiveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Translation endpoint URL
    pub endpoint: String,
    /// Client tag sent with every request
    pub client: String,
    /// Host used to build user-facing fallback links
    pub fallback_host: String,
    /// Minimum latency before a result is reported (anti-flicker floor)
    #[serde(default = "default_latency_floor_ms")]
    pub latency_floor_ms: u64,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Ollama endpoint URL
    pub endpoint: String,
    /// LLM model to use for translation
    pub model: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Quiet period before a pending input fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig {
                endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
                client: "gtx".to_string(),
                fallback_host: "https://translate.google.com".to_string(),
                latency_floor_ms: 100,
                timeout_secs: 30,
            },
            local: LocalConfig {
                endpoint: "http://localhost:11434".to_string(),
                model: "llama3.2:3b".to_string(),
                timeout_secs: 300,
            },
            live: LiveConfig {
                debounce_ms: 400,
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GlotError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| GlotError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlotError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| GlotError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
            [remote]
            endpoint = "https://example.invalid/translate"
            client = "gtx"
            fallback_host = "https://example.invalid"
            timeout_secs = 10

            [local]
            endpoint = "http://localhost:11434"
            model = "llama3.2:3b"
            timeout_secs = 60

            [live]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.remote.latency_floor_ms, 100);
        assert_eq!(config.live.debounce_ms, 400);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::default();
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.remote.endpoint, config.remote.endpoint);
        assert_eq!(loaded.local.model, config.local.model);
    }
}
