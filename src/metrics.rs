use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("enron_search_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "enron_search_rate_limited_total",
        "Total requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "enron_search_tracked_clients",
        "Client keys currently tracked by the rate limiter"
    )
    .unwrap();
    pub static ref ENGINE_LATENCY: Histogram = register_histogram!(
        "enron_search_engine_latency_seconds",
        "Search engine call latency in seconds"
    )
    .unwrap();
}
