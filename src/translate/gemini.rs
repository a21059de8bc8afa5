use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{RawProviderResult, TranslationProvider, TranslationRequest};
use crate::config::GeminiCredentials;

/// Gemini `generateContent` backend, driven by a fixed translation prompt.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentBody {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Prompt sent to the model for one request.
pub fn build_prompt(request: &TranslationRequest) -> String {
    format!(
        "Translate the following text into {}. Provide only the translated text, without any additional explanations or context:\n\n\"{}\"",
        request.target_language_name, request.text
    )
}

impl GeminiProvider {
    pub fn new(client: Client, credentials: &GeminiCredentials) -> Self {
        info!(
            "Initialized GeminiProvider: model={}, base_url={}",
            credentials.model, credentials.base_url
        );
        Self {
            client,
            api_key: credentials.api_key.clone(),
            model: credentials.model.clone(),
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn call(&self, request: &TranslationRequest) -> RawProviderResult {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentBody {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(request)),
                }],
            }],
        };

        let response = match self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RawProviderResult::from_transport(e),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return RawProviderResult::from_transport(e),
        };
        debug!("Gemini responded: status={}, model={}", status, self.model);

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorResponse>(&text)
                .unwrap_or_default()
                .error;
            let (reason, message) = match error {
                Some(e) => (e.status, e.message),
                None => (None, None),
            };
            return RawProviderResult::Rejected {
                status: status.as_u16(),
                reason,
                message: message.or_else(|| status.canonical_reason().map(str::to_string)),
            };
        }

        match serde_json::from_str::<GenerateContentResponse>(&text) {
            Ok(payload) => RawProviderResult::Translated(
                payload
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content)
                    .and_then(|c| c.parts.into_iter().next())
                    .and_then(|p| p.text)
                    .map(|t| t.trim().to_string()),
            ),
            Err(e) => RawProviderResult::Malformed(e.to_string()),
        }
    }
}
