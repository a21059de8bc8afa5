use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::state::AppState;
use crate::webhook::{self, IngressError, SIGNATURE_HEADER};

/// Webhook entry point: verify, parse, dispatch, acknowledge.
///
/// Only signature and parse failures change the response; whatever happens
/// to individual events, an accepted delivery is answered with 200.
pub async fn line_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, IngressError> {
    let delivery_id = Uuid::new_v4();
    let span = info_span!("delivery", %delivery_id);

    async move {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());

        let events = match webhook::accept(&body, signature, &state.config.line.channel_secret) {
            Ok(events) => events,
            Err(e @ IngressError::InvalidSignature) => {
                warn!("Invalid signature received.");
                return Err(e);
            }
            Err(e) => {
                error!("Error processing webhook: {}", e);
                return Err(e);
            }
        };

        if !events.is_empty() {
            let summary = state.dispatcher.handle_batch(events).await;
            info!(
                received = summary.received,
                actionable = summary.actionable,
                replied = summary.replied,
                failed = summary.failed,
                "Delivery dispatched"
            );
        }

        Ok(Json(json!({ "success": true })))
    }
    .instrument(span)
    .await
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.router.provider_name()
    }))
}
