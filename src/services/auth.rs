use uuid::Uuid;
use zeroize::Zeroizing;

use crate::crypto::password;
use crate::error::{AppError, Result};
use crate::models::user::{NewUser, UserSummary};
use crate::state::AppState;

/// The outcome of a successful signup or login.
#[derive(Debug)]
pub struct IssuedSession {
    /// The minimal projection of the authenticated user.
    pub user: UserSummary,
    /// The signed session token.
    pub token: String,
}

/// Hashes a password on the blocking thread pool.
async fn hash_blocking(password: Zeroizing<String>) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
}

/// Verifies a password on the blocking thread pool.
async fn verify_blocking(password: Zeroizing<String>, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
}

/// Registers a new user and issues their first session token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The user's email; must not be registered yet.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the `IssuedSession`, or `AppError::Conflict` if the
/// email is already registered.
pub async fn signup(state: &AppState, email: String, password: String) -> Result<IssuedSession> {
    tracing::debug!("🔐 Creating user: {}", email);
    let password_hash = hash_blocking(Zeroizing::new(password)).await?;

    let user = state
        .users
        .create_user(NewUser {
            id: Uuid::new_v4(),
            email,
            password_hash,
        })
        .await?;

    tracing::info!("✅ User created with ID: {}", user.id);

    let token = state.tokens.issue(user.id, &user.email)?;

    Ok(IssuedSession {
        user: UserSummary::from(&user),
        token,
    })
}

/// Authenticates a user by email and password and issues a session token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The user's email.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the `IssuedSession`. Fails with `AppError::NotFound`
/// for an unknown email and `AppError::InvalidCredential` for a wrong
/// password.
pub async fn login(state: &AppState, email: String, password: String) -> Result<IssuedSession> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_blocking(Zeroizing::new(password), user.password.clone()).await? {
        return Err(AppError::InvalidCredential);
    }

    tracing::info!("✅ User authenticated: {}", user.id);

    let token = state.tokens.issue(user.id, &user.email)?;

    Ok(IssuedSession {
        user: UserSummary::from(&user),
        token,
    })
}
