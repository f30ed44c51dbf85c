use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    config::MAX_SESSION_DURATION_DAYS,
    error::{AppError, Result},
    models::session::Claims,
};

/// Signing and verification keys for session tokens (HS256).
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    /// Creates keys from a shared secret and a token lifetime in days.
    ///
    /// The lifetime is clamped to `1..=MAX_SESSION_DURATION_DAYS`.
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::days(ttl_days.clamp(1, MAX_SESSION_DURATION_DAYS)),
        }
    }

    /// The lifetime of every issued token.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for the given user, valid from now.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issues a token as if it had been signed at `issued_at`.
    pub fn issue_at(&self, user_id: Uuid, email: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        tracing::debug!("🔑 Issued session token for user: {}", user_id);
        Ok(token)
    }

    /// Checks the signature and expiry of a token and returns its claims.
    ///
    /// Every failure collapses to [`AppError::Forbidden`].
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("❌ Session token expired"),
                    ErrorKind::InvalidSignature => tracing::debug!("❌ Session token signature mismatch"),
                    other => tracing::debug!("❌ Session token rejected: {:?}", other),
                }
                AppError::Forbidden
            })?;

        // decode() accepts exp == now; the token's lifetime is half-open.
        if data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("❌ Session token expired");
            return Err(AppError::Forbidden);
        }

        Ok(data.claims)
    }
}
