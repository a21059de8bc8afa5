use async_trait::async_trait;

use crate::config::TargetLanguage;

/// One text to translate into the configured target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language_name: String,
    pub target_language_code: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: &TargetLanguage) -> Self {
        Self {
            text: text.into(),
            target_language_name: target.name.clone(),
            target_language_code: target.code.clone(),
        }
    }
}

/// What a provider call produced, before it is mapped to an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawProviderResult {
    /// 2xx with a well-formed body. `None` when the payload carried no text.
    Translated(Option<String>),
    /// Non-success status with whatever the provider said about it.
    Rejected {
        status: u16,
        reason: Option<String>,
        message: Option<String>,
    },
    /// 2xx whose body could not be parsed.
    Malformed(String),
    /// The request never got a response (connect error, timeout, ...).
    Transport { detail: String, timed_out: bool },
}

impl RawProviderResult {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        Self::Transport {
            timed_out: err.is_timeout(),
            detail: err.to_string(),
        }
    }
}

/// A single translation backend.
///
/// Implementations issue exactly one HTTP call per `call` and never retry.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable identifier used in logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn call(&self, request: &TranslationRequest) -> RawProviderResult;
}
