//! Application setup and runtime.

pub mod config;
pub mod error;

use crate::{db, db::logs::LogStore, http};
use config::Config;
use sqlx::SqlitePool;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
  pub db: SqlitePool,
  pub config: Arc<Config>,
}

impl AppState {
  pub fn new(db: SqlitePool, config: Config) -> Self {
    Self {
      db,
      config: Arc::new(config),
    }
  }

  pub fn logs(&self) -> LogStore {
    LogStore::new(self.db.clone())
  }
}

/// Connect to the configured database and run migrations.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
  let pool = db::connect(&config.database).await?;
  db::run_migrations(&pool).await?;
  Ok(pool)
}

/// Start the HTTP server with the given configuration.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let pool = connect(&config).await?;
  let addr: SocketAddr = config.listen.parse()?;
  let state = AppState::new(pool, config);

  let app = http::build_router(state);

  info!("logpile dashboard:   http://{}/", addr);
  info!("ingestion endpoint:  POST http://{}/api/v1/log", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}

/// Delete logs older than `keep_logs_days` and report the number removed.
pub async fn cleanup(config: Config) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
  println!("Deleting logs older than {} days...", config.keep_logs_days);
  let pool = connect(&config).await?;
  let deleted = LogStore::new(pool)
    .delete_older_than(config.keep_logs_days)
    .await?;
  println!("Done. {deleted} rows deleted");
  info!(deleted, "cleanup finished");
  Ok(deleted)
}
