use std::sync::Arc;
use crate::config::Config;
use crate::crypto::token::TokenKeys;
use crate::error::Result;
use crate::repositories::{memory::MemoryUserStore, postgres::PgUserStore, user::UserStore};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The credential store, shared for the application's lifetime.
    pub users: Arc<dyn UserStore>,
    /// The application's configuration.
    pub config: Config,
    /// Session token signing and verification keys.
    pub tokens: TokenKeys,
}

impl AppState {
    /// Creates a new `AppState`, connecting to PostgreSQL when a
    /// `DATABASE_URL` is configured.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let users: Arc<dyn UserStore> = match config.database_url.as_deref() {
            Some(url) => {
                let pool = crate::db::create_pool(url, config.database_max_connections)?;
                crate::db::ensure_schema(&pool).await?;
                tracing::info!(
                    "✅ PostgreSQL Pool initialized with deadpool-postgres (max {} connections)",
                    config.database_max_connections
                );
                Arc::new(PgUserStore::new(pool))
            }
            None => {
                tracing::warn!("⚠️ DATABASE_URL not set, using in-memory user store");
                Arc::new(MemoryUserStore::new())
            }
        };

        Ok(Self::with_store(config, users))
    }

    /// Creates an `AppState` around an already constructed store.
    pub fn with_store(config: &Config, users: Arc<dyn UserStore>) -> Self {
        let tokens = TokenKeys::new(&config.jwt_key, config.session_duration_days);
        tracing::info!(
            "✅ Session tokens valid for {} days",
            tokens.ttl().num_days()
        );

        AppState {
            users,
            config: config.clone(),
            tokens,
        }
    }
}
