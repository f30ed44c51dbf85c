use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::{ProfileUpdate, UserProfile},
    state::AppState,
};

/// The outcome of a profile update.
#[derive(Debug, PartialEq, Eq)]
pub enum ProfileOutcome {
    Updated,
    /// Another user already holds the requested username.
    UsernameTaken,
}

/// Loads the profile of the authenticated user.
pub async fn get_user_info(state: &AppState, user_id: Uuid) -> Result<UserProfile> {
    let user = state
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(UserProfile::from(user))
}

/// Writes the profile of the authenticated user.
///
/// A username held by someone else is reported as an outcome rather than an
/// error; the client shows it inline on the form.
pub async fn set_user_info(
    state: &AppState,
    user_id: Uuid,
    profile: ProfileUpdate,
) -> Result<ProfileOutcome> {
    if let Some(holder) = state.users.find_by_username(&profile.username).await? {
        if holder.id != user_id {
            tracing::debug!("Username already taken: {}", profile.username);
            return Ok(ProfileOutcome::UsernameTaken);
        }
    }

    match state.users.update_profile(&user_id, profile).await {
        Ok(()) => {
            tracing::info!("✅ Profile updated for user: {}", user_id);
            Ok(ProfileOutcome::Updated)
        }
        // Lost a race against another update that claimed the same name.
        Err(AppError::Conflict(_)) => Ok(ProfileOutcome::UsernameTaken),
        Err(e) => Err(e),
    }
}
