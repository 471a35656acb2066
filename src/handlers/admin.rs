use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Query, State};

use crate::error::ApiError;
use crate::models::AdminParams;
use crate::state::AppState;

/// Plain-text snapshot of the rate limiter, for operators. Still subject to
/// the rate gate; additionally guarded by the admin secret when one is
/// configured. Without a secret the route is open - a known weak default.
pub async fn admin_ips_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminParams>,
) -> Result<String, ApiError> {
    if let Some(secret) = &state.admin_key {
        if params.key.as_deref() != Some(secret.as_str()) {
            return Err(ApiError::Forbidden);
        }
    }

    let mut body = String::from("Recent IPs:\n");
    for (key, count) in state.limiter.report() {
        let _ = writeln!(body, "{} - {} requests", key, count);
    }
    Ok(body)
}
