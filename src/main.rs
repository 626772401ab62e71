use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "guardpost")]
#[command(about = "Gateway for the guard rating and verification platform")]
#[command(version)]
struct Args {
    #[arg(long, env = "GUARDPOST_PORT", default_value_t = 3000, help = "Port to listen on")]
    port: u16,

    #[arg(
        long,
        env = "GUARDPOST_BACKEND_URL",
        help = "Platform API base URL (defaults to the configured environment preset)"
    )]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up GUARDPOST_BACKEND_URL etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = guardpost::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Guardpost in {:?} mode", config.environment);

    let backend_url = args
        .backend_url
        .unwrap_or_else(|| config.backend.base_url.clone());
    let app = guardpost::startup::app(&backend_url)?;

    let bind_addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Guardpost listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")
}
