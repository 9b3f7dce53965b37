// Language detection
//
// Two detectors share one interface:
// - Whatlang: trigram-based statistical detection with a confidence score
// - Patterns: static per-language script table, used when statistical
//   confidence is too low or the detector is unavailable

pub mod patterns;
pub mod whatlang;

pub use patterns::PatternDetector;
pub use whatlang::WhatlangDetector;

use crate::error::Result;

/// Minimum confidence for a statistical detection to be trusted
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDetection {
    pub language: String,
    pub confidence: f64,
}

/// Detection interface, ranked results with the highest confidence first
#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<Vec<LanguageDetection>>;
}

/// Create the default statistical detector
pub fn create_default() -> Box<dyn LanguageDetector> {
    Box::new(WhatlangDetector::new())
}
