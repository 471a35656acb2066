use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::client_ip;
use crate::error::ApiError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_TOTAL};
use crate::rate_limit::Decision;
use crate::state::AppState;

/// Pre-handler gate applied to every route: resolve the client key, log the
/// request, consult the rate limiter. Rejected requests are answered here
/// and never reach a handler - admins included.
pub async fn request_gate(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_ip::resolve(request.headers(), peer);
    tracing::info!(
        client = %key,
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or(""),
        "request"
    );

    REQUEST_TOTAL.inc();
    if state.limiter.check(&key) == Decision::Reject {
        RATE_LIMITED_TOTAL.inc();
        return ApiError::RateLimitExceeded.into_response();
    }

    next.run(request).await
}
