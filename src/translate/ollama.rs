use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::local::{PairAvailability, TranslationEngine, TranslationSession};
use crate::config::LocalConfig;
use crate::error::{GlotError, Result};

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TranslationPayload {
    text: String,
}

/// On-device translation engine backed by Ollama
pub struct OllamaEngine {
    client: Client,
    config: LocalConfig,
}

impl OllamaEngine {
    pub fn new(config: LocalConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }
}

#[async_trait]
impl TranslationEngine for OllamaEngine {
    /// Check that Ollama is reachable and the model is loaded
    async fn is_available(&self) -> bool {
        let url = format!("{}/api/show", self.config.endpoint);
        let request = json!({ "name": self.config.model });

        match self.client.post(&url).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Ollama model '{}' is available", self.config.model);
                true
            }
            Ok(_) => {
                warn!(
                    "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
                    self.config.model, self.config.model
                );
                false
            }
            Err(e) => {
                warn!("Failed to connect to Ollama: {}", e);
                false
            }
        }
    }

    async fn pair_availability(&self, source: &str, target: &str) -> Result<PairAvailability> {
        if language_name(source).is_some() && language_name(target).is_some() {
            Ok(PairAvailability::Available)
        } else {
            Ok(PairAvailability::Unavailable)
        }
    }

    async fn open_session(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Box<dyn TranslationSession>> {
        Ok(Box::new(OllamaSession {
            client: self.client.clone(),
            config: self.config.clone(),
            source: source.to_string(),
            target: target.to_string(),
        }))
    }

    fn supported_languages(&self) -> Vec<String> {
        LANGUAGE_NAMES
            .iter()
            .map(|(code, _)| code.to_string())
            .collect()
    }
}

/// Session scoped to one language pair
pub struct OllamaSession {
    client: Client,
    config: LocalConfig,
    source: String,
    target: String,
}

#[async_trait]
impl TranslationSession for OllamaSession {
    async fn translate(&self, text: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(text, &self.source, &self.target),
            stream: false,
            format: "json".to_string(),
        };

        let url = format!("{}/api/generate", self.config.endpoint);

        debug!("Sending translation request to: {}", url);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(GlotError::RequestFailed {
                status: response.status().as_u16(),
            });
        }

        let generate_response: GenerateResponse = response.json().await?;
        extract_translation(&generate_response.response)
    }
}

/// Build a translation prompt pinned to the target language, JSON output
fn build_prompt(text: &str, source: &str, target: &str) -> String {
    let source_name = language_name(source).unwrap_or(source);
    let target_name = language_name(target).unwrap_or(target);

    format!(
        "You are a professional translator.\n\
         \n\
         CRITICAL: You must translate the text from {} to {} ONLY. \
         Do not translate to any other language.\n\
         The target language is: {} (language code: {})\n\
         \n\
         Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
         Do not include any explanations, alternatives, or text in other languages.\n\
         \n\
         Text to translate: \"{}\"\n",
        source_name, target_name, target_name, target, target_name, text
    )
}

/// Pull the translation out of the model's raw response
fn extract_translation(raw: &str) -> Result<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(GlotError::NoTranslationReturned);
    }

    if let Ok(payload) = serde_json::from_str::<TranslationPayload>(raw) {
        let text = payload.text.trim().to_string();
        if text.is_empty() {
            return Err(GlotError::NoTranslationReturned);
        }
        return Ok(text);
    }

    Ok(raw.to_string())
}

/// Language codes the engine accepts, with full names for clearer prompts
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("pl", "Polish"),
    ("nl", "Dutch"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("he", "Hebrew"),
    ("hu", "Hungarian"),
    ("cs", "Czech"),
    ("el", "Greek"),
    ("bg", "Bulgarian"),
    ("uk", "Ukrainian"),
    ("be", "Belarusian"),
];

fn language_name(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_language_name_lookup() {
        assert_eq!(language_name("ru"), Some("Russian"));
        assert_eq!(language_name("EN"), Some("English"));
        assert_eq!(language_name("xx"), None);
    }

    #[tokio::test]
    async fn test_pair_availability() {
        let engine = OllamaEngine::new(Config::default().local);

        assert_eq!(
            engine.pair_availability("en", "ru").await.unwrap(),
            PairAvailability::Available
        );
        assert_eq!(
            engine.pair_availability("en", "xx").await.unwrap(),
            PairAvailability::Unavailable
        );
        assert_eq!(
            engine.pair_availability("auto", "ru").await.unwrap(),
            PairAvailability::Unavailable
        );
    }

    #[test]
    fn test_extract_translation_from_json_payload() {
        assert_eq!(
            extract_translation("{\"text\": \"привет\"}").unwrap(),
            "привет"
        );
    }

    #[test]
    fn test_extract_translation_falls_back_to_raw_text() {
        assert_eq!(extract_translation("привет").unwrap(), "привет");
    }

    #[test]
    fn test_extract_translation_rejects_empty_response() {
        assert!(matches!(
            extract_translation("  "),
            Err(GlotError::NoTranslationReturned)
        ));
        assert!(matches!(
            extract_translation("{\"text\": \"\"}"),
            Err(GlotError::NoTranslationReturned)
        ));
    }

    #[test]
    fn test_prompt_names_both_languages() {
        let prompt = build_prompt("hello", "en", "ru");
        assert!(prompt.contains("from English to Russian"));
        assert!(prompt.contains("language code: ru"));
        assert!(prompt.contains("\"hello\""));
    }
}
