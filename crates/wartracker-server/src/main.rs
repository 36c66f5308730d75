//! War Tracker server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! loss database read-only, and serves the JSON query API over HTTP.
//!
//! ```
//! cargo run -p wartracker-server -- --config config.toml
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wartracker_server::{ServerConfig, expand_tilde};
use wartracker_store_sqlite::SqliteReports;

#[derive(Parser)]
#[command(author, version, about = "War Tracker reporting server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Serve this database instead of the configured `db_path`.
  #[arg(long)]
  db_path: Option<PathBuf>,
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

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(db_path) = cli.db_path {
    server_cfg.db_path = db_path;
  }

  let db_path = expand_tilde(&server_cfg.db_path);

  // Loading the option lists up front proves the file is readable.
  let reports = SqliteReports::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {db_path:?}"))?;

  let app = wartracker_server::router(Arc::new(reports));
  let address = server_cfg.address();

  tracing::info!(db = %db_path.display(), "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
