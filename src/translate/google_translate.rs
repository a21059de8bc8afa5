use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{RawProviderResult, TranslationProvider, TranslationRequest};
use crate::config::GoogleTranslateCredentials;

/// Google Cloud Translation (v2) backend.
pub struct GoogleTranslateProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

impl GoogleTranslateProvider {
    pub fn new(client: Client, credentials: &GoogleTranslateCredentials) -> Self {
        info!("Initialized GoogleTranslateProvider: base_url={}", credentials.base_url);
        Self {
            client,
            api_key: credentials.api_key.clone(),
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &'static str {
        "google_translate"
    }

    async fn call(&self, request: &TranslationRequest) -> RawProviderResult {
        let url = format!("{}/language/translate/v2", self.base_url);
        let body = TranslateBody {
            q: &request.text,
            target: &request.target_language_code,
            format: "text",
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
        debug!("Google Translate responded: status={}", status);

        if !status.is_success() {
            // Error bodies are best-effort; an unparsable one still carries the status.
            let error = serde_json::from_str::<ErrorResponse>(&text)
                .unwrap_or_default()
                .error;
            let reason = error
                .as_ref()
                .and_then(|e| e.errors.first())
                .and_then(|d| d.reason.clone());
            let message = error
                .and_then(|e| e.message)
                .or_else(|| status.canonical_reason().map(str::to_string));
            return RawProviderResult::Rejected {
                status: status.as_u16(),
                reason,
                message,
            };
        }

        match serde_json::from_str::<TranslateResponse>(&text) {
            Ok(payload) => RawProviderResult::Translated(
                payload
                    .data
                    .and_then(|d| d.translations.into_iter().next())
                    .and_then(|t| t.translated_text),
            ),
            Err(e) => RawProviderResult::Malformed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, client: Client) -> GoogleTranslateProvider {
        GoogleTranslateProvider::new(
            client,
            &GoogleTranslateCredentials {
                api_key: "gt-key".to_string(),
                base_url: server.uri(),
            },
        )
    }

    fn request() -> TranslationRequest {
        TranslationRequest {
            text: "こんにちは".to_string(),
            target_language_name: "English".to_string(),
            target_language_code: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_query_and_parses_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .and(query_param("key", "gt-key"))
            .and(body_json(json!({ "q": "こんにちは", "target": "en", "format": "text" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "translations": [{ "translatedText": "Hello" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server, Client::new()).call(&request()).await;
        assert_eq!(result, RawProviderResult::Translated(Some("Hello".to_string())));
    }

    #[tokio::test]
    async fn extracts_reason_from_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Daily Limit Exceeded",
                    "errors": [{ "reason": "dailyLimitExceeded", "domain": "usageLimits" }]
                }
            })))
            .mount(&server)
            .await;

        let result = provider(&server, Client::new()).call(&request()).await;
        assert_eq!(
            result,
            RawProviderResult::Rejected {
                status: 403,
                reason: Some("dailyLimitExceeded".to_string()),
                message: Some("Daily Limit Exceeded".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn non_json_error_falls_back_to_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let result = provider(&server, Client::new()).call(&request()).await;
        assert_eq!(
            result,
            RawProviderResult::Rejected {
                status: 502,
                reason: None,
                message: Some("Bad Gateway".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn empty_translations_is_not_an_error_at_this_layer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "translations": [] } })),
            )
            .mount(&server)
            .await;

        let result = provider(&server, Client::new()).call(&request()).await;
        assert_eq!(result, RawProviderResult::Translated(None));
    }

    #[tokio::test]
    async fn garbage_success_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = provider(&server, Client::new()).call(&request()).await;
        assert!(matches!(result, RawProviderResult::Malformed(_)));
    }

    #[tokio::test]
    async fn slow_response_surfaces_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let result = provider(&server, client).call(&request()).await;
        assert!(matches!(result, RawProviderResult::Transport { timed_out: true, .. }));
    }
}
