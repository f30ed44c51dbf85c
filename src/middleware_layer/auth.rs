use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    error::AppError,
    handlers::auth::SESSION_COOKIE,
    models::session::AuthUser,
    state::AppState,
};

/// Extracts the session token from the request cookies.
///
/// An empty cookie value counts as no token.
fn extract_session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// A middleware that requires a valid session token.
///
/// A missing token is `401`, a present but invalid or expired one is `403`.
/// On success the resolved [`AuthUser`] is placed in the request extensions
/// before the handler runs.
pub async fn verify_token(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking authentication...");

    let token = extract_session_token(&cookies).ok_or_else(|| {
        tracing::warn!("❌ No jwt cookie found");
        AppError::Unauthorized
    })?;

    let claims = state.tokens.verify(&token)?;

    tracing::debug!("✅ User authenticated: {}", claims.user_id);

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
