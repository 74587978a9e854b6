use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sched_core::date::{Clock, SystemClock};
use sched_core::db;
use sched_core::repository::SqliteRepository;
use sched_server::cli::Cli;
use sched_server::rest::create_router;
use sched_server::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli
        .load_config()
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!(
        port = config.port,
        db_file = %config.db_file.display(),
        web_dir = %config.web_dir.display(),
        "starting scheduler"
    );

    let pool = db::establish_connection(&config.db_file)
        .await
        .with_context(|| format!("failed to open database {}", config.db_file.display()))?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = SqliteRepository::new(pool, clock.clone());
    let state = Arc::new(AppState::new(repository, clock));
    let app = create_router(state, &config.web_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
