use std::sync::Arc;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::translate::gemini::GeminiProvider;
use crate::translate::google_translate::GoogleTranslateProvider;
use crate::translate::interface::TranslationProvider;

/// Which backend a deployment translates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GoogleTranslate,
    Gemini,
}

/// Static provider choice: Google Translate when its key is set, otherwise
/// Gemini, otherwise nothing. Never consults provider health.
pub fn select_provider(config: &ProviderConfig) -> Option<ProviderKind> {
    if config.google_translate.is_some() {
        Some(ProviderKind::GoogleTranslate)
    } else if config.gemini.is_some() {
        Some(ProviderKind::Gemini)
    } else {
        None
    }
}

/// Factory for the configured translation backend
pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the provider chosen by [`select_provider`], sharing `client`.
    pub fn create_provider(
        config: &ProviderConfig,
        client: Client,
    ) -> Option<Arc<dyn TranslationProvider>> {
        match (select_provider(config), &config.google_translate, &config.gemini) {
            (Some(ProviderKind::GoogleTranslate), Some(credentials), _) => {
                info!("Initializing translation provider: google_translate");
                if config.gemini.is_some() {
                    info!("Gemini key is also set; Google Translate takes precedence");
                }
                Some(Arc::new(GoogleTranslateProvider::new(client, credentials)))
            }
            (Some(ProviderKind::Gemini), _, Some(credentials)) => {
                info!("Initializing translation provider: gemini");
                Some(Arc::new(GeminiProvider::new(client, credentials)))
            }
            _ => {
                warn!("No translation provider key configured; replies will report unavailability");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiCredentials, GoogleTranslateCredentials};

    fn gemini() -> Option<GeminiCredentials> {
        Some(GeminiCredentials {
            api_key: "gem".to_string(),
            model: "m".to_string(),
            base_url: "http://localhost".to_string(),
        })
    }

    fn google() -> Option<GoogleTranslateCredentials> {
        Some(GoogleTranslateCredentials {
            api_key: "gt".to_string(),
            base_url: "http://localhost".to_string(),
        })
    }

    #[test]
    fn google_translate_wins_when_both_are_set() {
        let config = ProviderConfig {
            google_translate: google(),
            gemini: gemini(),
        };
        assert_eq!(select_provider(&config), Some(ProviderKind::GoogleTranslate));
    }

    #[test]
    fn gemini_only() {
        let config = ProviderConfig {
            google_translate: None,
            gemini: gemini(),
        };
        assert_eq!(select_provider(&config), Some(ProviderKind::Gemini));
    }

    #[test]
    fn nothing_configured() {
        assert_eq!(select_provider(&ProviderConfig::default()), None);
        assert!(ProviderFactory::create_provider(&ProviderConfig::default(), Client::new()).is_none());
    }

    #[test]
    fn factory_builds_the_selected_backend() {
        let config = ProviderConfig {
            google_translate: None,
            gemini: gemini(),
        };
        let provider = ProviderFactory::create_provider(&config, Client::new()).unwrap();
        assert_eq!(provider.name(), "gemini");
    }
}
