use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::{config::Host, NoTls};
use crate::error::{AppError, Result};
use std::time::Duration;

/// The credential/profile table. Idempotent, run once at startup.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id                  UUID PRIMARY KEY,
    email               TEXT NOT NULL UNIQUE,
    password            TEXT NOT NULL,
    username            TEXT UNIQUE,
    full_name           TEXT,
    description         TEXT,
    profile_image       TEXT,
    is_profile_info_set BOOLEAN NOT NULL DEFAULT false,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// Creates a new database connection pool.
///
/// # Arguments
///
/// * `database_url` - The URL of the PostgreSQL database.
/// * `max_size` - The maximum number of pooled connections.
///
/// # Returns
///
/// A `Result` containing the `Pool`.
pub fn create_pool(database_url: &str, max_size: usize) -> Result<Pool> {
    let mut cfg = Config::new();
    let pg_config: tokio_postgres::Config = database_url.parse()?;

    if let Some(host) = pg_config.get_hosts().first() {
        cfg.host = host_to_string(host);
    }

    if let Some(port) = pg_config.get_ports().first() {
        cfg.port = Some(*port);
    }

    if let Some(dbname) = pg_config.get_dbname() {
        cfg.dbname = Some(dbname.to_string());
    }

    if let Some(user) = pg_config.get_user() {
        cfg.user = Some(user.to_string());
    }

    if let Some(password) = pg_config.get_password() {
        cfg.password = Some(String::from_utf8_lossy(password).to_string());
    }

    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    let mut pool_config = PoolConfig::new(max_size);
    pool_config.timeouts = deadpool_postgres::Timeouts {
        wait: Some(Duration::from_secs(5)),
        create: Some(Duration::from_secs(2)),
        recycle: Some(Duration::from_secs(1)),
    };
    cfg.pool = Some(pool_config);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(AppError::from)
}

/// The deadpool form of a parsed host. A leading `/` marks a Unix socket
/// directory.
fn host_to_string(host: &Host) -> Option<String> {
    match host {
        Host::Tcp(hostname) => Some(hostname.clone()),
        #[cfg(unix)]
        Host::Unix(path) => {
            tracing::debug!("Using Unix socket directory {}", path.display());
            Some(path.to_string_lossy().into_owned())
        }
        #[allow(unreachable_patterns)]
        _ => {
            tracing::warn!("⚠️ Unsupported database host {:?}, using the default host", host);
            None
        }
    }
}

/// Creates the `users` table if it does not exist yet.
pub async fn ensure_schema(pool: &Pool) -> Result<()> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    tracing::info!("✅ Database schema verified");
    Ok(())
}
