use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::PageParams;
use crate::state::AppState;

pub async fn browse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .elastic
        .browse(params.from, params.size, &params.sort)
        .await?;
    Ok(Json(result))
}
