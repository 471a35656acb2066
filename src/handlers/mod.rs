mod admin;
mod browse;
mod health;
mod metrics;
mod search;

pub use admin::admin_ips_handler;
pub use browse::browse_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use search::search_handler;
