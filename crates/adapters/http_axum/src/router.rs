//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the JSON API and WebSocket feeds at the root, with a permissive
/// CORS policy (any origin may talk to the hub) and a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<DR, LR, P>(state: AppState<DR, LR, P>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
