use thiserror::Error;

pub const DAILY_LIMIT_MESSAGE: &str = "⚠️ Daily translation limit reached. Please try again tomorrow!";
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, an error occurred.";
pub const UNAVAILABLE_MESSAGE: &str = "Translation service is currently unavailable.";

/// Result of one translation attempt. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success { translated_text: String },
    RateLimited,
    Unavailable,
    ProviderError { detail: ProviderFailure },
}

/// Why a configured provider failed to produce a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    #[error("provider responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport failure (timed out: {timed_out}): {detail}")]
    Transport { detail: String, timed_out: bool },
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("no translation returned")]
    NoTranslation,
}

impl TranslationOutcome {
    /// Text sent back to the user for this outcome.
    pub fn reply_text(&self) -> &str {
        match self {
            Self::Success { translated_text } => translated_text,
            Self::RateLimited => DAILY_LIMIT_MESSAGE,
            Self::Unavailable => UNAVAILABLE_MESSAGE,
            Self::ProviderError { .. } => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::ProviderError { .. } => "provider_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
