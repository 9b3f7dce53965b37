//! Persistent user preferences.
//!
//! Settings carry the preferred translation method and the user's language
//! pair. Reads merge stored overrides over defaults; writes are explicit.
//! Storage failures are soft: reads fall back to defaults, writes report
//! false instead of propagating an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::GlotError;

fn default_method() -> TranslationMethod {
    TranslationMethod::Local
}

fn default_main_language() -> String {
    "ru".to_string()
}

fn default_secondary_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMethod {
    /// Public translation endpoint over HTTP
    Remote,
    /// On-device inference engine
    Local,
}

impl FromStr for TranslationMethod {
    type Err = GlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            _ => Err(GlotError::Config(format!(
                "Invalid translation method '{}'. Valid methods: remote, local",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_method")]
    pub translation_method: TranslationMethod,
    #[serde(default = "default_main_language")]
    pub main_language: String,
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translation_method: default_method(),
            main_language: default_main_language(),
            secondary_language: default_secondary_language(),
        }
    }
}

/// File-backed settings store with soft-fail semantics
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default location under the working directory
    pub fn default_location() -> PathBuf {
        PathBuf::from(".glot/settings.toml")
    }

    /// Load settings, merging stored overrides over defaults.
    /// A missing or unreadable file yields the defaults.
    pub fn get(&self) -> Settings {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str::<Settings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Failed to parse settings file, using defaults: {}", e);
                    Settings::default()
                }
            },
            Err(e) => {
                debug!("No stored settings ({}), using defaults", e);
                Settings::default()
            }
        }
    }

    /// Persist the given settings. Returns false when storage is unavailable.
    pub fn set(&self, settings: &Settings) -> bool {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create settings directory: {}", e);
                return false;
            }
        }

        let content = match toml::to_string_pretty(settings) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to serialize settings: {}", e);
                return false;
            }
        };

        match std::fs::write(&self.path, content) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write settings file: {}", e);
                false
            }
        }
    }

    /// Restore the defaults. Returns false when storage is unavailable.
    pub fn reset(&self) -> bool {
        self.set(&Settings::default())
    }
}
