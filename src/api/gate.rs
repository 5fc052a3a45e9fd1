//! Access gate: intercepts page requests before routing, classifies the path
//! as public or protected, and redirects based on session validity. The
//! session check verifies the token signature and expiry; a forged or expired
//! cookie is treated exactly like a missing one and cleared on the redirect.

use axum::{
    extract::{Extension, Request},
    http::{header::SET_COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

use super::session::{clear_session_cookie, extract_session_token};
use super::state::AuthConfig;
use crate::token;

/// Paths the gate never touches: the JSON API, service surfaces, and static
/// assets.
const EXCLUDED_PREFIXES: [&str; 5] = ["/api", "/api-docs", "/assets", "/health", "/swagger-ui"];

/// Pages reachable without a session.
const PUBLIC_PATHS: [&str; 3] = ["/", "/signup", "/forgot-password"];

pub async fn gate(
    Extension(config): Extension<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_excluded(&path) {
        return next.run(request).await;
    }

    let authenticated = has_valid_session(request.headers(), &config);
    let public = is_public(&path);

    if !public && !authenticated {
        debug!("No valid session for {path}, redirecting to /");
        let mut response = Redirect::temporary("/").into_response();
        // Drop whatever stale token the browser was still sending.
        if let Ok(cookie) = clear_session_cookie(&config) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        return response;
    }

    if public && authenticated {
        debug!("Active session on {path}, redirecting to /dashboard");
        return Redirect::temporary("/dashboard").into_response();
    }

    next.run(request).await
}

fn is_excluded(path: &str) -> bool {
    if path == "/favicon.ico" {
        return true;
    }
    EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

fn has_valid_session(headers: &HeaderMap, config: &AuthConfig) -> bool {
    extract_session_token(headers)
        .and_then(|token| token::verify(&token, config.token_secret()).ok())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::COOKIE, Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use secrecy::SecretString;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new(
            "http://localhost:8080".to_string(),
            SecretString::from("test-signing-secret"),
        ))
    }

    fn app(config: Arc<AuthConfig>) -> Router {
        Router::new()
            .route("/", get(|| async { "home" }))
            .route("/signup", get(|| async { "signup" }))
            .route("/forgot-password", get(|| async { "forgot" }))
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/api/auth/logout", get(|| async { "api" }))
            // Later layers wrap earlier ones, so the extension is installed
            // before the gate runs.
            .layer(axum::middleware::from_fn(gate))
            .layer(Extension(config))
    }

    fn request(path: &str, cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn valid_token(config: &AuthConfig) -> String {
        token::issue(
            Uuid::new_v4(),
            config.token_secret(),
            config.session_ttl_seconds(),
        )
        .unwrap()
    }

    #[test]
    fn test_is_excluded_prefixes() {
        assert!(is_excluded("/api"));
        assert!(is_excluded("/api/auth/login"));
        assert!(is_excluded("/health"));
        assert!(is_excluded("/swagger-ui/index.html"));
        assert!(is_excluded("/favicon.ico"));
        assert!(!is_excluded("/apifoo"));
        assert!(!is_excluded("/dashboard"));
        assert!(!is_excluded("/"));
    }

    #[test]
    fn test_is_public_exact_matches_only() {
        assert!(is_public("/"));
        assert!(is_public("/signup"));
        assert!(is_public("/forgot-password"));
        assert!(!is_public("/dashboard"));
        assert!(!is_public("/signup/extra"));
    }

    #[tokio::test]
    async fn test_protected_without_cookie_redirects_home_and_clears() {
        let config = test_config();
        let response = app(config)
            .oneshot(request("/dashboard", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/");
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_public_with_valid_cookie_redirects_to_dashboard() {
        let config = test_config();
        let cookie = format!("token={}", valid_token(&config));
        let response = app(config)
            .oneshot(request("/", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/dashboard");
    }

    #[tokio::test]
    async fn test_public_without_cookie_passes_through() {
        let config = test_config();
        let response = app(config).oneshot(request("/signup", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_with_valid_cookie_passes_through() {
        let config = test_config();
        let cookie = format!("token={}", valid_token(&config));
        let response = app(config)
            .oneshot(request("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forged_cookie_is_treated_as_absent() {
        let config = test_config();
        let other = AuthConfig::new(
            "http://localhost:8080".to_string(),
            SecretString::from("another-secret"),
        );
        let cookie = format!("token={}", valid_token(&other));
        let response = app(config)
            .oneshot(request("/dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/");
    }

    #[tokio::test]
    async fn test_expired_cookie_is_treated_as_absent() {
        let config = test_config();
        let expired =
            token::issue(Uuid::new_v4(), config.token_secret(), -3600).unwrap();
        let cookie = format!("token={expired}");
        let response = app(config)
            .oneshot(request("/dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_api_paths_are_never_gated() {
        let config = test_config();
        let response = app(config)
            .oneshot(request("/api/auth/logout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
