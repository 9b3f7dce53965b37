use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no text provided for translation")]
    EmptyInput,

    #[error("on-device translation capability is not available")]
    CapabilityUnavailable,

    #[error("translation from {src} to {target} is not supported by the local engine")]
    UnsupportedLanguagePair { src: String, target: String },

    #[error("translation request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("no translation returned from the endpoint")]
    NoTranslationReturned,

    #[error("language detection error: {0}")]
    Detection(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GlotError>;
