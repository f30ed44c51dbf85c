use std::env;
use std::net::{IpAddr, SocketAddr};
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Minimum length of the HS256 signing secret, in bytes.
const MIN_JWT_KEY_LEN: usize = 32;

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_DURATION_DAYS: i64 = 365;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum number of pooled PostgreSQL connections.
    pub database_max_connections: usize,
    /// The lifetime of a session token in days.
    pub session_duration_days: i64,
    /// The secret used to sign session tokens.
    pub jwt_key: Zeroizing<Vec<u8>>,
    /// Whether the server runs in production (enables `Secure` cookies).
    pub is_production: bool,
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let jwt_key = Zeroizing::new(
            env::var("JWT_KEY")
                .context("JWT_KEY must be set (generate with: openssl rand -hex 32)")?
                .into_bytes(),
        );

        if jwt_key.len() < MIN_JWT_KEY_LEN {
            anyhow::bail!("JWT_KEY must be at least {} bytes", MIN_JWT_KEY_LEN);
        }

        let host: IpAddr = env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string())
            .parse()
            .context("Invalid HOST")?;
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("Invalid PORT")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            session_duration_days: parse_session_duration_days(
                &env::var("SESSION_DURATION_DAYS").unwrap_or_else(|_| "3".to_string()),
            )?,
            jwt_key,
            is_production: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string())
                == "production",
            bind_addr: SocketAddr::new(host, port),
        })
    }

    /// A development configuration with the in-memory store and the given
    /// signing secret. Used by tests and local tooling.
    pub fn development(jwt_key: impl Into<Vec<u8>>) -> Self {
        Self {
            database_url: None,
            database_max_connections: 16,
            session_duration_days: 3,
            jwt_key: Zeroizing::new(jwt_key.into()),
            is_production: false,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }
}

/// Parses `SESSION_DURATION_DAYS`. A lifetime of zero or less would expire
/// every token at issue time.
fn parse_session_duration_days(raw: &str) -> Result<i64> {
    let days: i64 = raw
        .trim()
        .parse()
        .context("Invalid SESSION_DURATION_DAYS")?;

    if !(1..=MAX_SESSION_DURATION_DAYS).contains(&days) {
        anyhow::bail!(
            "SESSION_DURATION_DAYS must be between 1 and {}, got {}",
            MAX_SESSION_DURATION_DAYS,
            days
        );
    }

    Ok(days)
}
