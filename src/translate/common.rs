use serde::{Deserialize, Serialize};

use crate::error::{GlotError, Result};

/// Sentinel source language asking the backend to detect the source itself
pub const AUTO: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Reject empty input before any backend call
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(GlotError::EmptyInput);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    /// Engine-reported source, or the requested source when no detection occurred
    pub detected_language: String,
    pub source_language: String,
    pub target_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_rejected() {
        let request = TranslationRequest::new("   ", "en", "ru");
        assert!(matches!(request.validate(), Err(GlotError::EmptyInput)));
    }

    #[test]
    fn test_non_empty_text_is_accepted() {
        let request = TranslationRequest::new("hello", AUTO, "ru");
        assert!(request.validate().is_ok());
    }
}
