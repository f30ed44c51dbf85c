use axum::{
    Router,
    routing::{get, post},
    middleware::from_fn_with_state,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure};
use tracing::Level;

use crate::{handlers, middleware_layer, state::AppState};

/// Builds the HTTP router.
///
/// Signup and login are open; every other route sits behind the session
/// verifier.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/api/auth/get-user-info",
            get(handlers::profile::get_user_info).post(handlers::profile::get_user_info),
        )
        .route(
            "/api/auth/set-user-info",
            post(handlers::profile::set_user_info),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::verify_token,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false))
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
}
