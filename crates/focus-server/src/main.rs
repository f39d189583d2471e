use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use focus_config::FocusConfig;
use focus_db::service::FocusService;
use focus_server::AppState;

/// Task-tracking HTTP backend.
#[derive(Debug, Parser)]
#[command(name = "focus", version, about)]
struct Cli {
    /// Interface to bind (overrides `server.host`).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides `server.port`).
    #[arg(long, short)]
    port: Option<u16>,

    /// Database file or `:memory:` (overrides `database.path`).
    #[arg(long)]
    db: Option<String>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("focus error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = FocusConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.log.filter, cli.verbose)?;

    let service = FocusService::from_config(&config.database)
        .await
        .context("failed to open task store")?;
    tracing::info!(
        remote = config.database.is_remote(),
        path = %config.database.path,
        "task store ready"
    );

    let bind_addr = config.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    let local_addr = listener.local_addr().context("failed to read local address")?;
    tracing::info!("focus listening on http://{local_addr}");

    focus_server::serve(listener, AppState::new(service), shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("focus shut down");
    Ok(())
}

fn init_tracing(configured: &str, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { configured };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
