// Modular translation backends
//
// Both backends satisfy one contract through the Translator trait:
// - Remote: public machine-translation endpoint over HTTP
// - Local: on-device inference engine (availability-gated)

pub mod common;
pub mod local;
pub mod ollama;
pub mod remote;

use async_trait::async_trait;
use std::sync::Arc;

pub use common::*;
use crate::config::Config;
use crate::error::Result;
use crate::settings::TranslationMethod;

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request into the uniform result shape
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the given method
    pub fn create_translator(config: &Config, method: TranslationMethod) -> Box<dyn Translator> {
        match method {
            TranslationMethod::Remote => {
                Box::new(remote::RemoteTranslator::new(config.remote.clone()))
            }
            TranslationMethod::Local => {
                let engine = Arc::new(ollama::OllamaEngine::new(config.local.clone()));
                Box::new(local::LocalTranslator::new(engine))
            }
        }
    }
}
