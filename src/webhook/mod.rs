pub mod signature;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::line::{InboundEvent, WebhookBody};
use signature::validate_signature;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Failures that reject a whole delivery before anything is dispatched.
#[derive(Debug, Error)]
pub enum IngressError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("{0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, "Invalid signature").into_response()
            }
            Self::MalformedPayload(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Authenticate and parse one delivery. An empty channel secret rejects
/// everything, since anyone can sign with an empty key.
pub fn accept(
    raw_body: &[u8],
    signature: Option<&str>,
    channel_secret: &str,
) -> Result<Vec<InboundEvent>, IngressError> {
    let signature = signature.unwrap_or_default();
    if channel_secret.is_empty() || !validate_signature(raw_body, channel_secret, signature) {
        return Err(IngressError::InvalidSignature);
    }

    let body: WebhookBody = serde_json::from_slice(raw_body)?;
    Ok(body.events)
}
