use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{AUTO, TranslationRequest, TranslationResult, Translator};
use crate::error::{GlotError, Result};

/// Whether the engine can serve a language pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAvailability {
    Available,
    /// Supported but the language pack still has to be fetched
    Downloadable,
    Unavailable,
}

/// Host-provided on-device translation capability.
///
/// The gate sequence is availability check, pair availability check,
/// session creation, translate call. Abstracted as a trait so a test double
/// can simulate "unavailable", "unsupported pair", and engine failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Whether the capability exists at all in this environment
    async fn is_available(&self) -> bool;

    /// Whether the engine can serve the given pair
    async fn pair_availability(&self, source: &str, target: &str) -> Result<PairAvailability>;

    /// Create a translation session scoped to the language pair
    async fn open_session(&self, source: &str, target: &str)
        -> Result<Box<dyn TranslationSession>>;

    /// Language codes the engine accepts
    fn supported_languages(&self) -> Vec<String>;
}

/// A session bound to one language pair
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationSession: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Translator backed by the on-device engine.
///
/// Never falls back to the network itself; cross-backend fallback is the
/// orchestrator's job.
pub struct LocalTranslator {
    engine: Arc<dyn TranslationEngine>,
}

impl LocalTranslator {
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self { engine }
    }

    pub fn supported_languages(&self) -> Vec<String> {
        self.engine.supported_languages()
    }
}

#[async_trait]
impl Translator for LocalTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        request.validate()?;

        // The engine requires an explicit source; the auto sentinel must be
        // resolved by the caller first.
        if request.source_language == AUTO {
            return Err(GlotError::UnsupportedLanguagePair {
                src: request.source_language.clone(),
                target: request.target_language.clone(),
            });
        }

        if !self.engine.is_available().await {
            return Err(GlotError::CapabilityUnavailable);
        }

        let availability = self
            .engine
            .pair_availability(&request.source_language, &request.target_language)
            .await?;

        if availability == PairAvailability::Unavailable {
            return Err(GlotError::UnsupportedLanguagePair {
                src: request.source_language.clone(),
                target: request.target_language.clone(),
            });
        }

        debug!(
            "Opening local translation session {} -> {}",
            request.source_language, request.target_language
        );

        let session = self
            .engine
            .open_session(&request.source_language, &request.target_language)
            .await?;

        let translation = session.translate(&request.text).await?;

        Ok(TranslationResult {
            translation,
            detected_language: request.source_language.clone(),
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        })
    }
}
