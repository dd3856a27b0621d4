//! `mentora` server binary.
//!
//! Reads `mentora.toml` (or the path given with `--config`) and `MENTORA_*`
//! environment variables, opens the SQLite store, and serves the JSON API.
//! Any startup failure exits non-zero.
//!
//! ```sh
//! MENTORA_STORE_PATH=/var/lib/mentora.db MENTORA_PORT=8080 mentora
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mentora mentor/student roster server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "mentora.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = mentora_server::load_config(&cli.config)
    .context("failed to load configuration")?;

  let store = mentora_server::open_store(&cfg)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  tracing::info!("store connected");

  let app = mentora_server::router(Arc::new(store));
  let address = cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
