//! Per-client rate limiting

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::types::ApiError;
use crate::infrastructure::rate_limiter::{RateLimitResult, RateLimiter};

/// Key used when the peer address is unknown (e.g. in-process test clients)
const UNKNOWN_CLIENT: &str = "unknown";

/// Reject requests over the per-client budget with 429 and `Retry-After`
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request);
    let result = limiter.check_and_record(&client).await;

    if !result.allowed {
        warn!(client = %client, limit = result.limit, "Rate limit exceeded");

        let mut response = ApiError::rate_limited().into_response();
        add_rate_limit_headers(&mut response, &result);
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(result.reset_in_seconds.max(1)),
        );
        return response;
    }

    let mut response = next.run(request).await;
    add_rate_limit_headers(&mut response, &result);
    response
}

fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn add_rate_limit_headers(response: &mut Response, result: &RateLimitResult) {
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(result.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(result.remaining));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::infrastructure::rate_limiter::RateLimitConfig;

    fn app(requests: u32) -> Router {
        let limiter = Arc::new(RateLimiter::new(RateLimitConfig::new(
            requests,
            Duration::from_secs(60),
        )));

        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
    }

    fn request_from(addr: &str) -> Request<Body> {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let addr: SocketAddr = addr.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[tokio::test]
    async fn test_over_budget_is_rejected() {
        let app = app(2);

        for expected_remaining in ["1", "0"] {
            let response = app.clone().oneshot(request_from("10.0.0.1:4000")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["x-ratelimit-remaining"], expected_remaining);
        }

        let response = app.oneshot(request_from("10.0.0.1:4001")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn test_clients_have_separate_budgets() {
        let app = app(1);

        let first = app.clone().oneshot(request_from("10.0.0.1:1")).await.unwrap();
        let second = app.clone().oneshot(request_from("10.0.0.2:1")).await.unwrap();
        let repeat = app.oneshot(request_from("10.0.0.1:2")).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_peer_address_uses_shared_key() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(client_key(&request), UNKNOWN_CLIENT);
    }
}
