use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Open the shared pool described by `cfg`.
///
/// An in-memory SQLite database lives inside a single connection, so the pool
/// is pinned to one connection in that case.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    let in_memory = cfg.is_sqlite() && cfg.url.contains(":memory:");
    if in_memory {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), in_memory, "database connected");
    Ok(db)
}

/// Throwaway SQLite database, used by tests and local experiments.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    connect_with_config(&cfg).await
}
