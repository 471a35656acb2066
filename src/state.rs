use std::sync::Arc;

use crate::elastic::EsClient;
use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub elastic: EsClient,
    pub limiter: Arc<RateLimiter>,
    pub admin_key: Option<String>,
}
