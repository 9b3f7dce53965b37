//! Translation orchestration.
//!
//! Per request: plan the language direction from user settings, pick the
//! backend the settings ask for, fall back once from the local engine to
//! the remote endpoint on failure, and degrade to an actionable recovery
//! link when every attempt fails. Errors never propagate past this module;
//! callers only ever see an [`Outcome`] or a no-op.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::detect::{CONFIDENCE_THRESHOLD, LanguageDetector, PatternDetector, create_default};
use crate::settings::{Settings, TranslationMethod};
use crate::translate::{
    AUTO, TranslationRequest, TranslationResult, Translator, TranslatorFactory, remote,
};

/// Final state of one translate attempt
#[derive(Debug)]
pub enum Outcome {
    Translated(TranslationResult),
    Degraded(DegradedNotice),
}

/// Non-fatal failure payload with a recovery link, renderable as HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedNotice {
    pub message: String,
    pub fallback_url: String,
}

impl DegradedNotice {
    /// HTML fragment for surfaces that render rich output
    pub fn to_html(&self) -> String {
        format!(
            "<p>{} <a href=\"{}\" target=\"_blank\">Open in the web translator</a></p>",
            self.message, self.fallback_url
        )
    }
}

impl Outcome {
    /// One-line rendering for terminal output
    pub fn render(&self) -> String {
        match self {
            Outcome::Translated(result) => format!(
                "[{} -> {}] {}",
                result.detected_language, result.target_language, result.translation
            ),
            Outcome::Degraded(notice) => {
                format!("{} Recovery link: {}", notice.message, notice.fallback_url)
            }
        }
    }
}

pub struct Orchestrator {
    settings: Settings,
    remote: Box<dyn Translator>,
    local: Box<dyn Translator>,
    detector: Box<dyn LanguageDetector>,
    patterns: PatternDetector,
    fallback_host: String,
}

impl Orchestrator {
    pub fn new(config: &Config, settings: Settings) -> Self {
        let remote = TranslatorFactory::create_translator(config, TranslationMethod::Remote);
        let local = TranslatorFactory::create_translator(config, TranslationMethod::Local);

        Self::with_backends(
            settings,
            remote,
            local,
            create_default(),
            &config.remote.fallback_host,
        )
    }

    /// Assemble from explicit parts; used with doubles in tests
    pub fn with_backends(
        settings: Settings,
        remote: Box<dyn Translator>,
        local: Box<dyn Translator>,
        detector: Box<dyn LanguageDetector>,
        fallback_host: &str,
    ) -> Self {
        Self {
            settings,
            remote,
            local,
            detector,
            patterns: PatternDetector::new(),
            fallback_host: fallback_host.to_string(),
        }
    }

    /// Translate with the direction inferred from the user's language pair.
    /// Empty input is a no-op.
    pub async fn translate(&self, text: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty input");
            return None;
        }

        let (source, target) = self.plan_direction(text);
        Some(self.attempt(text, &source, &target).await)
    }

    /// Translate an explicit language pair, same backend and fallback policy
    pub async fn translate_pair(&self, text: &str, source: &str, target: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring empty input");
            return None;
        }

        Some(self.attempt(text, source, target).await)
    }

    /// Input in the main language goes main -> secondary; anything else goes
    /// (detected or auto) -> main. Evaluated fresh on every call so rapid
    /// input changes can flip the direction.
    fn plan_direction(&self, text: &str) -> (String, String) {
        let resolved = self.resolve_language(text);

        if resolved.as_deref() == Some(self.settings.main_language.as_str()) {
            (
                self.settings.main_language.clone(),
                self.settings.secondary_language.clone(),
            )
        } else {
            (
                resolved.unwrap_or_else(|| AUTO.to_string()),
                self.settings.main_language.clone(),
            )
        }
    }

    /// Detector first (top result above the confidence threshold), then the
    /// static pattern table
    fn resolve_language(&self, text: &str) -> Option<String> {
        match self.detector.detect(text) {
            Ok(ranked) => {
                if let Some(top) = ranked.first() {
                    if top.confidence > CONFIDENCE_THRESHOLD {
                        return Some(top.language.clone());
                    }
                    debug!(
                        "Detection confidence {:.2} for '{}' below threshold",
                        top.confidence, top.language
                    );
                }
            }
            Err(e) => warn!("Language detection failed: {}", e),
        }

        self.patterns.first_match(text)
    }

    async fn attempt(&self, text: &str, source: &str, target: &str) -> Outcome {
        let result = match self.settings.translation_method {
            TranslationMethod::Local => {
                // The local engine cannot accept the auto sentinel; resolve a
                // concrete source, with the main language as the last resort.
                let concrete_source = if source == AUTO {
                    self.resolve_language(text)
                        .unwrap_or_else(|| self.settings.main_language.clone())
                } else {
                    source.to_string()
                };

                let local_request = TranslationRequest::new(text, &concrete_source, target);
                match self.local.translate(&local_request).await {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        warn!("Local translation failed ({}), falling back to remote", e);
                        // One fallback, with the originally intended source
                        let remote_request = TranslationRequest::new(text, source, target);
                        self.remote.translate(&remote_request).await
                    }
                }
            }
            TranslationMethod::Remote => {
                let request = TranslationRequest::new(text, source, target);
                self.remote.translate(&request).await
            }
        };

        match result {
            Ok(result) => {
                if result.detected_language != result.source_language {
                    // Label rename only, never a retranslation
                    info!(
                        "Detected source language '{}' differs from requested '{}'",
                        result.detected_language, result.source_language
                    );
                }
                Outcome::Translated(result)
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                Outcome::Degraded(DegradedNotice {
                    message: "Translation failed.".to_string(),
                    fallback_url: remote::fallback_url(&self.fallback_host, text, source, target),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{LanguageDetection, MockLanguageDetector};
    use crate::error::GlotError;
    use crate::translate::MockTranslator;

    const FALLBACK_HOST: &str = "https://translate.google.com";

    fn settings(method: TranslationMethod) -> Settings {
        Settings {
            translation_method: method,
            main_language: "ru".to_string(),
            secondary_language: "en".to_string(),
        }
    }

    fn detector_returning(language: &str, confidence: f64) -> MockLanguageDetector {
        let language = language.to_string();
        let mut detector = MockLanguageDetector::new();
        detector.expect_detect().returning(move |_| {
            Ok(vec![LanguageDetection {
                language: language.clone(),
                confidence,
            }])
        });
        detector
    }

    fn result(translation: &str, detected: &str, source: &str, target: &str) -> TranslationResult {
        TranslationResult {
            translation: translation.to_string(),
            detected_language: detected.to_string(),
            source_language: source.to_string(),
            target_language: target.to_string(),
        }
    }

    fn orchestrator(
        method: TranslationMethod,
        remote: MockTranslator,
        local: MockTranslator,
        detector: MockLanguageDetector,
    ) -> Orchestrator {
        Orchestrator::with_backends(
            settings(method),
            Box::new(remote),
            Box::new(local),
            Box::new(detector),
            FALLBACK_HOST,
        )
    }

    #[tokio::test]
    async fn test_main_language_input_goes_main_to_secondary() {
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .withf(|req| req.source_language == "ru" && req.target_language == "en")
            .returning(|req| Ok(result("hello", "ru", &req.source_language, &req.target_language)));

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            MockTranslator::new(),
            detector_returning("ru", 0.9),
        );

        let outcome = orchestrator.translate("привет").await.unwrap();
        assert!(matches!(outcome, Outcome::Translated(_)));
    }

    #[tokio::test]
    async fn test_non_main_input_goes_detected_to_main() {
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .withf(|req| req.source_language == "en" && req.target_language == "ru")
            .returning(|req| {
                Ok(result("привет", "en", &req.source_language, &req.target_language))
            });

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            MockTranslator::new(),
            detector_returning("en", 0.9),
        );

        let outcome = orchestrator.translate("hello").await.unwrap();
        assert!(matches!(outcome, Outcome::Translated(_)));
    }

    #[tokio::test]
    async fn test_low_confidence_falls_back_to_pattern_table() {
        // Detector is unsure; the Latin script entry resolves "hello" to en
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .withf(|req| req.source_language == "en" && req.target_language == "ru")
            .returning(|req| {
                Ok(result("привет", "en", &req.source_language, &req.target_language))
            });

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            MockTranslator::new(),
            detector_returning("ru", 0.3),
        );

        let outcome = orchestrator.translate("hello").await.unwrap();
        assert!(matches!(outcome, Outcome::Translated(_)));
    }

    #[tokio::test]
    async fn test_local_failure_falls_back_to_remote_transparently() {
        let mut local = MockTranslator::new();
        local
            .expect_translate()
            .times(1)
            .returning(|_| Err(GlotError::CapabilityUnavailable));

        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .times(1)
            .withf(|req| req.source_language == "en" && req.target_language == "ru")
            .returning(|req| {
                Ok(result("привет", "en", &req.source_language, &req.target_language))
            });

        let orchestrator = orchestrator(
            TranslationMethod::Local,
            remote,
            local,
            detector_returning("en", 0.9),
        );

        let outcome = orchestrator.translate("hello").await.unwrap();
        match outcome {
            Outcome::Translated(result) => assert_eq!(result.translation, "привет"),
            other => panic!("expected translated outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remote_failure_never_tries_local() {
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .times(1)
            .returning(|_| Err(GlotError::RequestFailed { status: 502 }));

        let mut local = MockTranslator::new();
        local.expect_translate().never();

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            local,
            detector_returning("en", 0.9),
        );

        let outcome = orchestrator.translate("hello").await.unwrap();
        assert!(matches!(outcome, Outcome::Degraded(_)));
    }

    #[tokio::test]
    async fn test_both_backends_failing_yields_recovery_link() {
        let mut local = MockTranslator::new();
        local
            .expect_translate()
            .returning(|_| Err(GlotError::CapabilityUnavailable));

        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .returning(|_| Err(GlotError::RequestFailed { status: 503 }));

        let orchestrator = orchestrator(
            TranslationMethod::Local,
            remote,
            local,
            detector_returning("en", 0.9),
        );

        let outcome = orchestrator.translate("hello").await.unwrap();
        match outcome {
            Outcome::Degraded(notice) => {
                assert!(notice.fallback_url.ends_with("#en/ru/hello"));
                assert!(notice.to_html().contains(&notice.fallback_url));
            }
            other => panic!("expected degraded outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unresolved_local_source_defaults_to_main_language() {
        // Nothing detects "12345", so the local engine gets the main language
        let mut detector = MockLanguageDetector::new();
        detector.expect_detect().returning(|_| Ok(Vec::new()));

        let mut local = MockTranslator::new();
        local
            .expect_translate()
            .withf(|req| req.source_language == "ru" && req.target_language == "ru")
            .returning(|req| {
                Ok(result("12345", "ru", &req.source_language, &req.target_language))
            });

        let orchestrator = orchestrator(
            TranslationMethod::Local,
            MockTranslator::new(),
            local,
            detector,
        );

        let outcome = orchestrator.translate("12345").await.unwrap();
        assert!(matches!(outcome, Outcome::Translated(_)));
    }

    #[tokio::test]
    async fn test_identical_requests_yield_identical_results() {
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .times(2)
            .returning(|req| {
                Ok(result("привет", "en", &req.source_language, &req.target_language))
            });

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            MockTranslator::new(),
            detector_returning("en", 0.9),
        );

        let first = orchestrator.translate("hello").await.unwrap();
        let second = orchestrator.translate("hello").await.unwrap();
        match (first, second) {
            (Outcome::Translated(a), Outcome::Translated(b)) => assert_eq!(a, b),
            other => panic!("expected two translated outcomes, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let mut remote = MockTranslator::new();
        remote.expect_translate().never();
        let mut local = MockTranslator::new();
        local.expect_translate().never();
        let mut detector = MockLanguageDetector::new();
        detector.expect_detect().never();

        let orchestrator = orchestrator(TranslationMethod::Remote, remote, local, detector);

        assert!(orchestrator.translate("   ").await.is_none());
        assert!(orchestrator.translate_pair("", "en", "ru").await.is_none());
    }

    #[tokio::test]
    async fn test_explicit_pair_bypasses_direction_planning() {
        let mut remote = MockTranslator::new();
        remote
            .expect_translate()
            .withf(|req| req.source_language == "de" && req.target_language == "fr")
            .returning(|req| {
                Ok(result("bonjour", "de", &req.source_language, &req.target_language))
            });

        let mut detector = MockLanguageDetector::new();
        detector.expect_detect().never();

        let orchestrator = orchestrator(
            TranslationMethod::Remote,
            remote,
            MockTranslator::new(),
            detector,
        );

        let outcome = orchestrator
            .translate_pair("hallo", "de", "fr")
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Translated(_)));
    }
}
