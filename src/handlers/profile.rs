use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    models::{session::AuthUser, user::{ProfileUpdate, UserProfile}},
    services::profile::{self as profile_service, ProfileOutcome},
    state::AppState,
    validation::auth::validate_profile,
};

/// The request payload for `set-user-info`.
#[derive(Deserialize)]
pub struct SetUserInfoRequest {
    #[serde(default, rename = "userName")]
    pub user_name: String,
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub description: String,
}

/// The response payload for `get-user-info`.
#[derive(Serialize)]
pub struct UserInfoResponse {
    pub user: UserProfile,
}

/// Returns the profile of the authenticated user.
#[axum::debug_handler]
pub async fn get_user_info(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response> {
    let user = profile_service::get_user_info(&state, auth.user_id).await?;
    Ok((StatusCode::OK, Json(UserInfoResponse { user })).into_response())
}

/// Updates the profile of the authenticated user.
#[axum::debug_handler]
pub async fn set_user_info(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<SetUserInfoRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload.map_err(AppError::from)?;
    validate_profile(&req.user_name, &req.full_name, &req.description)?;

    let outcome = profile_service::set_user_info(
        &state,
        auth.user_id,
        ProfileUpdate {
            username: req.user_name,
            full_name: req.full_name,
            description: req.description,
        },
    )
    .await?;

    match outcome {
        ProfileOutcome::Updated => {
            Ok((StatusCode::OK, "Profile data updated successfully.").into_response())
        }
        ProfileOutcome::UsernameTaken => {
            let response = sonic_rs::to_string(&sonic_rs::json!({ "userNameError": true }))
                .map_err(|e| AppError::Internal(format!("Response serialization failed: {}", e)))?;
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                response,
            )
                .into_response())
        }
    }
}
