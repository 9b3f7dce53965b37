use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{TranslationRequest, TranslationResult, Translator};
use crate::config::RemoteConfig;
use crate::error::{GlotError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Response shape of the translation endpoint: an ordered sequence of
/// sentence fragments plus the detected source language
#[derive(Debug, Deserialize)]
struct EndpointResponse {
    #[serde(default)]
    sentences: Vec<Sentence>,
    src: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    trans: Option<String>,
}

/// Translator backed by the public translation endpoint
pub struct RemoteTranslator {
    client: Client,
    config: RemoteConfig,
}

impl RemoteTranslator {
    pub fn new(config: RemoteConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }

    /// User-facing web URL for the same text and language pair, used as the
    /// last-resort recovery link
    pub fn create_fallback_url(&self, text: &str, source: &str, target: &str) -> String {
        fallback_url(&self.config.fallback_host, text, source, target)
    }

    /// Parse the endpoint response body into the uniform result shape
    fn parse_response(&self, body: &str, request: &TranslationRequest) -> Result<TranslationResult> {
        let response: EndpointResponse = serde_json::from_str(body)?;

        if response.sentences.is_empty() {
            return Err(GlotError::NoTranslationReturned);
        }

        // Fragments arrive in sentence order and concatenate without a separator
        let translation: String = response
            .sentences
            .iter()
            .filter_map(|sentence| sentence.trans.as_deref())
            .collect();

        if translation.is_empty() {
            return Err(GlotError::NoTranslationReturned);
        }

        let detected_language = response
            .src
            .unwrap_or_else(|| request.source_language.clone());

        Ok(TranslationResult {
            translation,
            detected_language,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        })
    }
}

#[async_trait]
impl Translator for RemoteTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        request.validate()?;

        debug!(
            "Sending translation request to {} ({} -> {})",
            self.config.endpoint, request.source_language, request.target_language
        );

        // Anti-flicker floor: wait for the slower of {response, timer}.
        // The timer never aborts the request.
        let floor = tokio::time::sleep(Duration::from_millis(self.config.latency_floor_ms));
        let send = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("client", self.config.client.as_str()),
                ("dt", "t"),
                ("dj", "1"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("q", request.text.as_str()),
            ])
            .send();

        let (response, ()) = tokio::join!(send, floor);
        let response = response?;

        if !response.status().is_success() {
            return Err(GlotError::RequestFailed {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        self.parse_response(&body, request)
    }
}

/// Build the fallback web URL without needing a translator instance
pub fn fallback_url(host: &str, text: &str, source: &str, target: &str) -> String {
    format!(
        "{}/#{}/{}/{}",
        host,
        source,
        target,
        urlencoding::encode(text)
    )
}
