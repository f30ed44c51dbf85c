use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::{error::SqlState, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::{NewUser, ProfileUpdate, User},
    repositories::user::{UserStore, EMAIL_TAKEN, USERNAME_TAKEN},
};

const USER_COLUMNS: &str = "id, email, password, username, full_name, description, \
    profile_image, is_profile_info_set, created_at";

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        email: row.try_get("email").map_err(|_| AppError::MissingData("email".to_string()))?,
        password: row.try_get("password").map_err(|_| AppError::MissingData("password".to_string()))?,
        username: row.try_get("username").map_err(|_| AppError::MissingData("username".to_string()))?,
        full_name: row.try_get("full_name").map_err(|_| AppError::MissingData("full_name".to_string()))?,
        description: row.try_get("description").map_err(|_| AppError::MissingData("description".to_string()))?,
        profile_image: row.try_get("profile_image").map_err(|_| AppError::MissingData("profile_image".to_string()))?,
        is_profile_info_set: row.try_get("is_profile_info_set").map_err(|_| AppError::MissingData("is_profile_info_set".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

fn is_unique_violation(e: &tokio_postgres::Error) -> bool {
    e.code() == Some(&SqlState::UNIQUE_VIOLATION)
}

/// A `UserStore` backed by PostgreSQL through a deadpool connection pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &(dyn tokio_postgres::types::ToSql + Sync)) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let statement = client
            .prepare_cached(&format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column))
            .await?;
        let row = client.query_opt(&statement, &[value]).await?;
        row.map(|r| row_to_user(&r)).transpose()
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let client = self.pool.get().await?;
        let statement = client
            .prepare_cached(&format!(
                "INSERT INTO users (id, email, password) VALUES ($1, $2, $3) RETURNING {}",
                USER_COLUMNS
            ))
            .await?;

        let row = client
            .query_one(&statement, &[&new_user.id, &new_user.email, &new_user.password_hash])
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(EMAIL_TAKEN.to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        row_to_user(&row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one("email", &email).await
    }

    async fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>> {
        self.find_one("id", user_id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_one("username", &username).await
    }

    async fn update_profile(&self, user_id: &Uuid, profile: ProfileUpdate) -> Result<()> {
        let client = self.pool.get().await?;
        let statement = client
            .prepare_cached(
                r#"
                UPDATE users
                SET
                    username = $1,
                    full_name = $2,
                    description = $3,
                    is_profile_info_set = true
                WHERE id = $4
                "#,
            )
            .await?;

        let updated = client
            .execute(
                &statement,
                &[&profile.username, &profile.full_name, &profile.description, user_id],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(USERNAME_TAKEN.to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        if updated == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
