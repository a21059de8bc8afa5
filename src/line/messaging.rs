use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::events::ReplyToken;
use crate::config::LineConfig;

/// Longest text the reply API accepts in one message.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("reply request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("reply API responded with status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest {
    pub reply_token: ReplyToken,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Text { text: String },
}

impl ReplyMessageRequest {
    /// A reply carrying one text message, cut to [`MAX_TEXT_CHARS`].
    pub fn text(reply_token: ReplyToken, text: &str) -> Self {
        let text = match text.char_indices().nth(MAX_TEXT_CHARS) {
            Some((end, _)) => text[..end].to_string(),
            None => text.to_string(),
        };
        Self {
            reply_token,
            messages: vec![OutboundMessage::Text { text }],
        }
    }
}

/// Outbound half of the messaging platform.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn reply_message(&self, request: &ReplyMessageRequest) -> Result<(), MessagingError>;
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// Messaging API client authenticated with the channel access token.
#[derive(Debug, Clone)]
pub struct LineMessagingClient {
    client: Client,
    base_url: String,
    channel_access_token: String,
}

impl LineMessagingClient {
    pub fn new(client: Client, config: &LineConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            channel_access_token: config.channel_access_token.clone(),
        }
    }
}

#[async_trait]
impl MessagingClient for LineMessagingClient {
    async fn reply_message(&self, request: &ReplyMessageRequest) -> Result<(), MessagingError> {
        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Reply accepted: status={}", status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);
        Err(MessagingError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
