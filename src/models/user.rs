use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's email address. Unique across users.
    pub email: String,
    /// The user's hashed password (argon2 PHC string).
    pub password: String,
    /// The user's public handle, set once the profile is filled in.
    pub username: Option<String>,
    /// The user's full name.
    pub full_name: Option<String>,
    /// A free-form description shown on the seller page.
    pub description: Option<String>,
    /// Path of the uploaded profile image.
    pub profile_image: Option<String>,
    /// Whether the user has completed their profile.
    pub is_profile_info_set: bool,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

/// A credential record about to be inserted.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Profile fields written by `set-user-info`.
#[derive(Clone, Debug)]
pub struct ProfileUpdate {
    pub username: String,
    pub full_name: String,
    pub description: String,
}

/// The minimal projection returned from signup and login.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
}

/// The projection returned from `get-user-info`.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub image: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub is_profile_set: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            image: user.profile_image,
            username: user.username,
            full_name: user.full_name,
            description: user.description,
            is_profile_set: user.is_profile_info_set,
        }
    }
}
