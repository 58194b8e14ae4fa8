use std::time::Duration;

use configs::DatabaseConfig;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Effective database settings: `config.toml` when readable, otherwise env/defaults.
pub static DATABASE_CONFIG: Lazy<DatabaseConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    DatabaseConfig::from_file().unwrap_or_else(|_| DatabaseConfig::from_env())
});

pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    connect_with_config(&DATABASE_CONFIG).await
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}
