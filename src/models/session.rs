use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The claims carried inside a session token.
///
/// The token is stateless: nothing is stored server-side, so a token stays
/// valid until `exp` regardless of later account changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// The ID of the user this token was issued to.
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// The email the user authenticated with.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// The identity the session verifier attaches to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}
