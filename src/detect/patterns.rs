use regex::Regex;
use tracing::debug;

use super::{LanguageDetection, LanguageDetector};
use crate::error::{GlotError, Result};

/// Confidence reported for a script-table hit
const PATTERN_CONFIDENCE: f64 = 0.9;

/// Script heuristics per language code. Ordered: kana must precede the Han
/// ideograph range (Japanese text usually mixes both), and the Latin entry
/// is the catch-all at the bottom.
const PATTERNS: &[(&str, &str)] = &[
    ("ru", r"[\u{0400}-\u{04FF}]"),
    ("ja", r"[\u{3040}-\u{30FF}]"),
    ("ko", r"[\u{AC00}-\u{D7AF}]"),
    ("zh", r"[\u{4E00}-\u{9FFF}]"),
    ("ar", r"[\u{0600}-\u{06FF}]"),
    ("he", r"[\u{0590}-\u{05FF}]"),
    ("el", r"[\u{0370}-\u{03FF}]"),
    ("hi", r"[\u{0900}-\u{097F}]"),
    ("th", r"[\u{0E00}-\u{0E7F}]"),
    ("en", r"[A-Za-z]"),
];

/// Static pattern table used when statistical detection is unavailable or
/// below the confidence threshold
pub struct PatternDetector {
    patterns: Vec<(&'static str, Regex)>,
}

impl PatternDetector {
    pub fn new() -> Self {
        let patterns = PATTERNS
            .iter()
            .map(|(code, pattern)| {
                let regex = Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid builtin pattern for {}: {}", code, e));
                (*code, regex)
            })
            .collect();

        Self { patterns }
    }

    /// First language whose script pattern matches the text
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(code, _)| {
                debug!("Pattern table matched language: {}", code);
                code.to_string()
            })
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for PatternDetector {
    fn detect(&self, text: &str) -> Result<Vec<LanguageDetection>> {
        if text.trim().is_empty() {
            return Err(GlotError::Detection(
                "cannot detect language of empty text".to_string(),
            ));
        }

        Ok(self
            .first_match(text)
            .map(|language| LanguageDetection {
                language,
                confidence: PATTERN_CONFIDENCE,
            })
            .into_iter()
            .collect())
    }
}
