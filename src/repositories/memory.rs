use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::{NewUser, ProfileUpdate, User},
    repositories::user::{UserStore, EMAIL_TAKEN, USERNAME_TAKEN},
};

/// A process-local `UserStore`.
///
/// Used when no `DATABASE_URL` is configured and by the test suite.
/// Uniqueness checks and writes happen under one write lock, so concurrent
/// signups with the same email see exactly one winner.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }
        if users.contains_key(&new_user.id) {
            return Err(AppError::Internal(format!("Duplicate user id: {}", new_user.id)));
        }

        let user = User {
            id: new_user.id,
            email: new_user.email,
            password: new_user.password_hash,
            username: None,
            full_name: None,
            description: None,
            profile_image: None,
            is_profile_info_set: false,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn update_profile(&self, user_id: &Uuid, profile: ProfileUpdate) -> Result<()> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|u| u.id != *user_id && u.username.as_deref() == Some(profile.username.as_str()));
        if taken {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.username = Some(profile.username);
        user.full_name = Some(profile.full_name);
        user.description = Some(profile.description);
        user.is_profile_info_set = true;

        Ok(())
    }
}
