use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// REST API authentication settings.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Bearer token for REST API access. None = auth disabled.
    pub bearer_token: Option<String>,
}

/// True when `headers` carry the expected bearer token, or no token is
/// configured.
pub fn is_authorized(auth: &AuthConfig, headers: &HeaderMap) -> bool {
    let Some(expected) = auth.bearer_token.as_deref() else {
        return true;
    };
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == expected)
}

/// Axum middleware that validates Bearer token authentication. The
/// [`AuthConfig`] is read from the request extensions.
pub async fn bearer_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    if !is_authorized(&auth, request.headers()) {
        tracing::debug!(uri = %request.uri(), "Rejected unauthenticated API request");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
