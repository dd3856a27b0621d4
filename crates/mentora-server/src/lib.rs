//! Process wiring for the Mentora roster service.
//!
//! Loads [`ServerConfig`], opens the SQLite store, and wraps the API router
//! in request tracing. The binary in `main.rs` sequences these steps and
//! aborts on the first failure.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use mentora_core::store::RosterStore;
use mentora_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix for environment overrides, e.g. `MENTORA_PORT=8080`.
pub const ENV_PREFIX: &str = "MENTORA";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered as built-in defaults, then the optional TOML file, then
/// `MENTORA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file; `:memory:` for a throwaway store.
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration from `file` (if it exists) and the process
/// environment.
pub fn load_config(file: &Path) -> Result<ServerConfig, config::ConfigError> {
  load_config_with(file, config::Environment::with_prefix(ENV_PREFIX))
}

fn load_config_with(
  file: &Path,
  env: config::Environment,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 3000)?
    .set_default("store_path", "mentora.db")?
    .add_source(config::File::from(file).required(false))
    .add_source(env.try_parsing(true))
    .build()?
    .try_deserialize()
}

// ─── Startup ──────────────────────────────────────────────────────────────────

/// Open the store named by `cfg`, expanding a leading `~/`.
pub async fn open_store(
  cfg: &ServerConfig,
) -> Result<SqliteStore, mentora_store_sqlite::Error> {
  let path = expand_tilde(&cfg.store_path);
  tracing::info!(path = %path.display(), "opening store");
  SqliteStore::open(&path).await
}

/// The API router with per-request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RosterStore + 'static,
{
  mentora_api::api_router(store).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
