use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keygate_api::{server, AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(name = "keygate-api", version, about = "API-key gated record enrichment service")]
struct Args {
    /// Interface to bind (overrides API_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides API_PORT / PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, SUPABASE_ANON_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!(
        "Starting keygate-api in {:?} mode (key table '{}', match {:?})",
        config.environment,
        config.store.table,
        config.auth.key_match
    );

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::from_config(config).context("failed to build key store client")?;

    server::serve(state, &bind_addr)
        .await
        .with_context(|| format!("server on {} failed", bind_addr))
}
