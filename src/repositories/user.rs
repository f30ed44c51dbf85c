use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::user::{NewUser, ProfileUpdate, User},
};

/// Message carried by the conflict raised on a duplicate email.
pub const EMAIL_TAKEN: &str = "Email Already Registered";
/// Message carried by the conflict raised on a duplicate username.
pub const USERNAME_TAKEN: &str = "Username Already Taken";

/// Persistence for credential records and profiles.
///
/// Implementations own uniqueness: a duplicate email on insert or a
/// duplicate username on update fails with `AppError::Conflict` and leaves
/// the store unchanged.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new credential record.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Finds a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Finds a user by their ID.
    async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>>;

    /// Finds a user by their public username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Writes the profile fields and marks the profile as set.
    async fn update_profile(&self, user_id: &Uuid, profile: ProfileUpdate) -> Result<()>;
}
