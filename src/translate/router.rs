use std::sync::Arc;
use reqwest::Client;
use tracing::{debug, error, warn};

use crate::config::ProviderConfig;
use crate::translate::factory::ProviderFactory;
use crate::translate::interface::{RawProviderResult, TranslationProvider, TranslationRequest};
use crate::translate::outcome::{ProviderFailure, TranslationOutcome};

/// Statuses that mean the provider's quota is spent or access was revoked.
const RATE_LIMIT_STATUSES: [u16; 2] = [403, 429];
const DAILY_LIMIT_REASON: &str = "dailyLimitExceeded";
const DAILY_LIMIT_PHRASE: &str = "daily limit exceeded";

/// Sends each request to the single provider chosen at startup and maps
/// the raw result onto a [`TranslationOutcome`].
pub struct TranslationRouter {
    provider: Option<Arc<dyn TranslationProvider>>,
}

impl TranslationRouter {
    pub fn new(provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ProviderConfig, client: Client) -> Self {
        Self::new(ProviderFactory::create_provider(config, client))
    }

    /// Name of the provider in use, if any.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub async fn translate(&self, request: &TranslationRequest) -> TranslationOutcome {
        let Some(provider) = &self.provider else {
            error!("No translation provider is configured");
            return TranslationOutcome::Unavailable;
        };

        debug!(
            "Translating with {}: target={}",
            provider.name(),
            request.target_language_code
        );
        let raw = provider.call(request).await;
        let outcome = classify(raw);

        match &outcome {
            TranslationOutcome::Success { .. } => {}
            TranslationOutcome::RateLimited => {
                warn!("{} daily limit reached", provider.name());
            }
            TranslationOutcome::ProviderError { detail } => {
                error!("{} translation failed: {}", provider.name(), detail);
            }
            TranslationOutcome::Unavailable => {}
        }
        outcome
    }
}

/// Map a provider's raw result onto the outcome taxonomy.
pub fn classify(raw: RawProviderResult) -> TranslationOutcome {
    match raw {
        RawProviderResult::Rejected {
            status,
            reason,
            message,
        } => {
            if is_rate_limited(status, reason.as_deref(), message.as_deref()) {
                TranslationOutcome::RateLimited
            } else {
                TranslationOutcome::ProviderError {
                    detail: ProviderFailure::Status {
                        status,
                        message: message.unwrap_or_default(),
                    },
                }
            }
        }
        RawProviderResult::Transport { detail, timed_out } => TranslationOutcome::ProviderError {
            detail: ProviderFailure::Transport { detail, timed_out },
        },
        RawProviderResult::Malformed(detail) => TranslationOutcome::ProviderError {
            detail: ProviderFailure::Malformed(detail),
        },
        RawProviderResult::Translated(Some(text)) if !text.trim().is_empty() => {
            TranslationOutcome::Success {
                translated_text: text,
            }
        }
        RawProviderResult::Translated(_) => TranslationOutcome::ProviderError {
            detail: ProviderFailure::NoTranslation,
        },
    }
}

fn is_rate_limited(status: u16, reason: Option<&str>, message: Option<&str>) -> bool {
    RATE_LIMIT_STATUSES.contains(&status)
        || reason == Some(DAILY_LIMIT_REASON)
        || message.is_some_and(|m| m.to_lowercase().contains(DAILY_LIMIT_PHRASE))
}
