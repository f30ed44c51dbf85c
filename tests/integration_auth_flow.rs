use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use gigs_auth::{
    config::Config,
    repositories::memory::MemoryUserStore,
    routes,
    state::AppState,
};

const JWT_KEY: &str = "integration-test-secret-that-is-long-enough";

// Shared test context: one server per test on an ephemeral port.
struct TestContext {
    client: reqwest::Client,
    base_url: String,
    state: AppState,
    store: Arc<MemoryUserStore>,
}

impl TestContext {
    async fn new() -> Self {
        let config = Config::development(JWT_KEY);
        let store = Arc::new(MemoryUserStore::new());
        let state = AppState::with_store(&config, store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = routes::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: Self::new_client(),
            base_url: format!("http://{}", addr),
            state,
            store,
        }
    }

    fn new_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap()
    }

    fn unique_email() -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("user_{}@x.com", nanos)
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    /// A request that bypasses the cookie store and sends exactly `cookie`.
    async fn get_with_cookie(&self, path: &str, cookie: Option<String>) -> reqwest::Response {
        let mut request = reqwest::Client::new().get(format!("{}{}", self.base_url, path));
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request.send().await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_login_and_profile() {
        let context = TestContext::new().await;

        // Step 1: Signup
        let signup_response = context
            .post("/api/auth/signup", json!({ "email": "a@x.com", "password": "secret1" }))
            .await;
        assert_eq!(signup_response.status().as_u16(), 201, "Signup failed");
        let signup_body: Value = signup_response.json().await.unwrap();
        assert_eq!(signup_body["user"]["email"], "a@x.com");
        assert!(signup_body["user"].get("password").is_none());
        assert!(signup_body["jwt"].is_string());
        let user_id = signup_body["user"]["id"].as_str().unwrap().to_string();

        // Step 2: Login
        let login_response = context
            .post("/api/auth/login", json!({ "email": "a@x.com", "password": "secret1" }))
            .await;
        assert_eq!(login_response.status().as_u16(), 200, "Login failed");

        let set_cookie = login_response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(set_cookie.starts_with("jwt="));
        assert!(set_cookie.contains("SameSite=None"));

        let jwt_cookie = login_response
            .cookies()
            .find(|c| c.name() == "jwt")
            .expect("jwt cookie not found in login response");
        assert!(jwt_cookie.http_only());
        assert!(!jwt_cookie.secure());
        assert_eq!(jwt_cookie.path(), Some("/"));
        assert_eq!(
            jwt_cookie.max_age(),
            Some(std::time::Duration::from_secs(3 * 24 * 60 * 60))
        );

        let claims = context.state.tokens.verify(jwt_cookie.value()).unwrap();
        assert_eq!(claims.user_id.to_string(), user_id);

        let login_body: Value = login_response.json().await.unwrap();
        assert_eq!(login_body["user"]["id"], user_id.as_str());
        assert_eq!(login_body["user"]["email"], "a@x.com");

        // Step 3: Protected profile lookup with the stored cookie
        let profile_response = context
            .client
            .get(format!("{}/api/auth/get-user-info", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(profile_response.status().as_u16(), 200, "Profile lookup failed");
        let profile_body: Value = profile_response.json().await.unwrap();
        assert_eq!(profile_body["user"]["email"], "a@x.com");
        assert_eq!(profile_body["user"]["id"], user_id.as_str());
        assert_eq!(profile_body["user"]["isProfileSet"], false);

        // Step 4: No cookie at all
        let anonymous = context.get_with_cookie("/api/auth/get-user-info", None).await;
        assert_eq!(anonymous.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict() {
        let context = TestContext::new().await;
        let email = TestContext::unique_email();

        let first = context
            .post("/api/auth/signup", json!({ "email": email, "password": "secret1" }))
            .await;
        assert_eq!(first.status().as_u16(), 201);

        let second = context
            .post("/api/auth/signup", json!({ "email": email, "password": "other-pass" }))
            .await;
        assert_eq!(second.status().as_u16(), 409);
        let body: Value = second.json().await.unwrap();
        assert_eq!(body["error"], "Email Already Registered");

        assert_eq!(context.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_error_statuses() {
        let context = TestContext::new().await;
        let email = TestContext::unique_email();

        context
            .post("/api/auth/signup", json!({ "email": email, "password": "secret1" }))
            .await;

        let unknown = context
            .post("/api/auth/login", json!({ "email": "nobody@x.com", "password": "secret1" }))
            .await;
        assert_eq!(unknown.status().as_u16(), 404);

        let wrong = context
            .post("/api/auth/login", json!({ "email": email, "password": "wrong-pass" }))
            .await;
        assert_eq!(wrong.status().as_u16(), 400);
        let body: Value = wrong.json().await.unwrap();
        assert_eq!(body["error"], "Invalid Password");

        let missing = context
            .post("/api/auth/login", json!({ "email": email }))
            .await;
        assert_eq!(missing.status().as_u16(), 400);
        let body: Value = missing.json().await.unwrap();
        assert_eq!(body["error"], "Email and Password Required");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let context = TestContext::new().await;

        let response = context
            .client
            .post(format!("{}/api/auth/signup", context.base_url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let bad_email = context
            .post("/api/auth/signup", json!({ "email": "not-an-email", "password": "secret1" }))
            .await;
        assert_eq!(bad_email.status().as_u16(), 400);
        assert!(context.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_and_tampered_tokens_are_forbidden() {
        let context = TestContext::new().await;

        let expired = context
            .state
            .tokens
            .issue_at(
                Uuid::new_v4(),
                "a@x.com",
                Utc::now() - Duration::days(3) - Duration::seconds(1),
            )
            .unwrap();
        let response = context
            .get_with_cookie("/api/auth/get-user-info", Some(format!("jwt={}", expired)))
            .await;
        assert_eq!(response.status().as_u16(), 403);

        // Swap the first signature character; all of its bits are significant.
        let token = context.state.tokens.issue(Uuid::new_v4(), "a@x.com").unwrap();
        let split = token.rfind('.').unwrap() + 1;
        let replacement = if token[split..].starts_with('A') { "B" } else { "A" };
        let tampered = format!("{}{}{}", &token[..split], replacement, &token[split + 1..]);
        let response = context
            .get_with_cookie("/api/auth/get-user-info", Some(format!("jwt={}", tampered)))
            .await;
        assert_eq!(response.status().as_u16(), 403);
    }

    #[tokio::test]
    async fn test_json_wrapped_cookie_is_forbidden() {
        let context = TestContext::new().await;
        let token = context.state.tokens.issue(Uuid::new_v4(), "a@x.com").unwrap();

        // Only the bare token is a valid cookie value.
        let wrapped = format!(r#"jwt={{"jwt":"{}"}}"#, token);
        let response = context
            .get_with_cookie("/api/auth/get-user-info", Some(wrapped))
            .await;
        assert_eq!(response.status().as_u16(), 403);

        let encoded = format!("jwt=%7B%22jwt%22%3A%22{}%22%7D", token);
        let response = context
            .get_with_cookie("/api/auth/get-user-info", Some(encoded))
            .await;
        assert_eq!(response.status().as_u16(), 403);
    }

    #[tokio::test]
    async fn test_concurrent_signups_with_same_email() {
        let context = TestContext::new().await;
        let email = TestContext::unique_email();

        let (first, second) = tokio::join!(
            context.post("/api/auth/signup", json!({ "email": email, "password": "secret1" })),
            context.post("/api/auth/signup", json!({ "email": email, "password": "secret2" })),
        );

        let mut statuses = [first.status().as_u16(), second.status().as_u16()];
        statuses.sort_unstable();
        assert_eq!(statuses, [201, 409]);
        assert_eq!(context.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_valid_token_for_deleted_user_is_not_found() {
        let context = TestContext::new().await;

        let token = context.state.tokens.issue(Uuid::new_v4(), "ghost@x.com").unwrap();
        let response = context
            .get_with_cookie("/api/auth/get-user-info", Some(format!("jwt={}", token)))
            .await;
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_set_user_info() {
        let context = TestContext::new().await;
        let email = TestContext::unique_email();

        let signup = context
            .post("/api/auth/signup", json!({ "email": email, "password": "secret1" }))
            .await;
        assert_eq!(signup.status().as_u16(), 201);

        let missing = context
            .post("/api/auth/set-user-info", json!({ "userName": "seller" }))
            .await;
        assert_eq!(missing.status().as_u16(), 400);

        let update = context
            .post(
                "/api/auth/set-user-info",
                json!({ "userName": "seller", "fullName": "Sam Seller", "description": "Logo design" }),
            )
            .await;
        assert_eq!(update.status().as_u16(), 200);
        assert_eq!(update.text().await.unwrap(), "Profile data updated successfully.");

        let profile: Value = context
            .client
            .post(format!("{}/api/auth/get-user-info", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(profile["user"]["username"], "seller");
        assert_eq!(profile["user"]["fullName"], "Sam Seller");
        assert_eq!(profile["user"]["description"], "Logo design");
        assert_eq!(profile["user"]["isProfileSet"], true);

        // A second account cannot claim the same username.
        let rival = TestContext::new_client();
        let rival_signup = rival
            .post(format!("{}/api/auth/signup", context.base_url))
            .json(&json!({ "email": TestContext::unique_email(), "password": "secret1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(rival_signup.status().as_u16(), 201);

        let clash: Value = rival
            .post(format!("{}/api/auth/set-user-info", context.base_url))
            .json(&json!({ "userName": "seller", "fullName": "Other", "description": "Copycat" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(clash["userNameError"], true);
    }

    #[tokio::test]
    async fn test_set_user_info_requires_session() {
        let context = TestContext::new().await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/auth/set-user-info", context.base_url))
            .json(&json!({ "userName": "seller", "fullName": "Sam", "description": "Hi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}
