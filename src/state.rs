use std::sync::Arc;
use reqwest::Client;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::line::{LineMessagingClient, MessagingClient};
use crate::translate::TranslationRouter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub router: Arc<TranslationRouter>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Wire the production clients. One `reqwest::Client` (and its timeout)
    /// is shared by the translation providers and the reply API.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        let router = Arc::new(TranslationRouter::from_config(&config.providers, client.clone()));
        let messenger = Arc::new(LineMessagingClient::new(client, &config.line));
        Ok(Self::with_components(config, router, messenger))
    }

    pub fn with_components(
        config: Config,
        router: Arc<TranslationRouter>,
        messenger: Arc<dyn MessagingClient>,
    ) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(
            router.clone(),
            messenger,
            config.target_language.clone(),
        ));
        Self {
            config: Arc::new(config),
            router,
            dispatcher,
        }
    }
}
