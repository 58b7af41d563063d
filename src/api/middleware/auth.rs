//! Bearer token authentication

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::error::MSG_UNAUTHORIZED;
use crate::domain::{Caller, DomainError, RequestContext};

/// Extractor that requires a valid identity token
///
/// The token is read from either:
/// - Authorization header: `Bearer <token>`
/// - X-API-Key header: `<token>`
///
/// A missing or invalid token rejects the request with 401 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct RequireCaller(pub Caller);

impl RequireCaller {
    /// Request context carrying this caller, for the service layer
    pub fn context(&self) -> RequestContext {
        RequestContext::authenticated(self.0)
    }
}

impl FromRequestParts<AppState> for RequireCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::from(DomainError::unauthorized(MSG_UNAUTHORIZED)))?;

        let account_id = state.token_service.verify(&token).map_err(|e| {
            debug!(error = %e, "Rejected identity token");
            ApiError::from(e)
        })?;

        Ok(RequireCaller(Caller::new(account_id)))
    }
}

/// Token from `Authorization: Bearer` or `X-API-Key`, Bearer first.
/// Unreadable header values count as absent.
fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let api_key = || {
        headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    };

    bearer
        .or_else(api_key)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
