use anyhow::Result;
use estate_listings::config::{self, Config};
use estate_listings::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();

    let config = config::load_from_env()?;

    init_tracing(&config)?;
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }

    Ok(())
}
