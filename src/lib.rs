use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;

pub mod client_ip;
pub mod config;
pub mod elastic;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;

use handlers::{
    admin_ips_handler, browse_handler, health_handler, metrics_handler, search_handler,
};
use state::AppState;

/// Builds the full router. The rate gate wraps every route, the admin and
/// metrics endpoints included.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/browse", get(browse_handler))
        .route("/admin/ips", get(admin_ips_handler))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            gate::request_gate,
        ))
        .with_state(state)
}
