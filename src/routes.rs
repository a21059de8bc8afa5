use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health_check, line_webhook};
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Platform webhook
        .route("/line-webhook", post(line_webhook))

        // Health check
        .route("/api/health", get(health_check))
}
