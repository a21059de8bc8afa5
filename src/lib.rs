pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod line;
pub mod routes;
pub mod state;
pub mod translate;
pub mod webhook;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Full HTTP application for the given state.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
