use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};

use crate::{
    config::Config,
    error::{AppError, Result},
    models::user::UserSummary,
    services::auth as auth_service,
    state::AppState,
    validation::auth::validate_credentials,
};

/// Name of the cookie carrying the session token. The value is the bare
/// token string.
pub const SESSION_COOKIE: &str = "jwt";

/// The request payload for signup and login.
///
/// Missing fields deserialize as empty so that validation, not the JSON
/// extractor, reports them.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The response payload for signup.
#[derive(Serialize)]
pub struct SignupResponse {
    pub user: UserSummary,
    pub jwt: String,
}

/// The response payload for login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserSummary,
}

/// Creates the session cookie for the given token.
fn create_session_cookie(config: &Config, token: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);

    cookie.set_http_only(true);
    // Left unset, SameSite=None makes the cookie crate emit Secure anyway.
    cookie.set_secure(config.is_production);
    cookie.set_same_site(SameSite::None);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie.set_path("/");

    cookie
}

/// Handles user signup.
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload.map_err(AppError::from)?;
    tracing::info!("📝 Signup attempt");
    validate_credentials(&payload.email, &payload.password)?;

    let session = auth_service::signup(&state, payload.email, payload.password).await?;

    cookies.add(create_session_cookie(
        &state.config,
        session.token.clone(),
        state.tokens.ttl().num_seconds(),
    ));
    tracing::info!("✅ User registered: {}", session.user.id);

    let response = SignupResponse {
        user: session.user,
        jwt: session.token,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload.map_err(AppError::from)?;
    tracing::info!("🔐 Login attempt");
    validate_credentials(&payload.email, &payload.password)?;

    let session = auth_service::login(&state, payload.email, payload.password).await?;

    cookies.add(create_session_cookie(
        &state.config,
        session.token,
        state.tokens.ttl().num_seconds(),
    ));
    tracing::info!("✅ User logged in: {}", session.user.id);

    let response = LoginResponse { user: session.user };

    Ok((StatusCode::OK, Json(response)).into_response())
}
