use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "enron-search")]
#[command(about = "HTTP search API for the Enron email corpus")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Base URL of the search engine
    #[arg(short, long, default_value = "http://localhost:9200")]
    pub elastic_url: String,

    // Index holding the email corpus
    #[arg(short, long, default_value = "enron")]
    pub index: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 60)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // How often to sweep expired rate-limit windows, in seconds
    #[arg(long, default_value_t = 300)]
    pub sweep_interval: u64,

    // How long an expired window is kept before the sweep drops it, in seconds
    #[arg(long, default_value_t = 600)]
    pub sweep_retention: u64,

    // Shared secret for /admin/ips; the route is open when unset
    #[arg(long, env = "ADMIN_KEY")]
    pub admin_key: Option<String>,
}
