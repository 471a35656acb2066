use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use enron_search::config::Args;
use enron_search::elastic::EsClient;
use enron_search::rate_limit::{self, RateLimiter};
use enron_search::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let limiter = Arc::new(RateLimiter::new(args.rate_limit, args.rate_window));
    let state = Arc::new(AppState {
        elastic: EsClient::new(reqwest::Client::new(), &args.elastic_url, &args.index),
        limiter: Arc::clone(&limiter),
        admin_key: args.admin_key.clone(),
    });

    tokio::spawn(rate_limit::sweeper(
        limiter,
        Duration::from_secs(args.sweep_interval),
        args.sweep_retention,
    ));

    let app = enron_search::app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        port = args.port,
        engine = %args.elastic_url,
        index = %args.index,
        rate_limit = args.rate_limit,
        rate_window = args.rate_window,
        admin_gated = args.admin_key.is_some(),
        "enron-search listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
