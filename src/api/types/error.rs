//! JSON error envelope and the mapping from domain errors to HTTP

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

pub const MSG_SERVER_ERROR: &str = "Something went wrong";
pub const MSG_INVALID_PATH_PARAMETER: &str = "Invalid url path parameter";
pub const MSG_INVALID_QUERY_PARAMETER: &str = "Invalid url query parameter";
pub const MSG_RATE_LIMITED: &str = "Too many requests";

/// Coarse error class reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    ConflictError,
    RateLimitError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::RateLimitError => write!(f, "rate_limit_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Stable machine-readable code, one per error kind
    pub code: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error_type: ApiErrorType,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: code.into(),
                },
            },
        }
    }

    pub fn code(&self) -> &str {
        &self.response.error.code
    }

    pub fn message(&self) -> &str {
        &self.response.error.message
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "validation_failed",
            message,
        )
    }

    pub fn invalid_request_body(detail: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "invalid_request_body",
            format!("Invalid request body: {}", detail),
        )
    }

    pub fn invalid_path_parameter() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "invalid_path_parameter",
            MSG_INVALID_PATH_PARAMETER,
        )
    }

    pub fn invalid_query_parameter() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "invalid_query_parameter",
            MSG_INVALID_QUERY_PARAMETER,
        )
    }

    pub fn unauthorized(code: &str, message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            code,
            message,
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, "not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, "conflict", message)
    }

    pub fn rate_limited() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            ApiErrorType::RateLimitError,
            "rate_limited",
            MSG_RATE_LIMITED,
        )
    }

    /// Generic server fault. The cause is never part of the response.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            "server_error",
            MSG_SERVER_ERROR,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.is_server_fault() {
            error!(error = %err, "Request failed with a server fault");
            return Self::internal();
        }

        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Unauthorized { message } => Self::unauthorized("unauthorized", message),
            DomainError::WrongCredential { message } => {
                Self::unauthorized("wrong_credential", message)
            }
            DomainError::EmailNotRegistered { message } => {
                Self::unauthorized("email_not_registered", message)
            }
            DomainError::Validation { message } => Self::validation_failed(message),
            DomainError::Storage { .. }
            | DomainError::Cache { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => Self::internal(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{
        MSG_EMAIL_NOT_REGISTERED, MSG_EMAIL_REGISTERED, MSG_UNAUTHORIZED, MSG_WRONG_PASSWORD,
    };

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::post_not_found(), StatusCode::NOT_FOUND, "not_found"),
            (DomainError::conflict(MSG_EMAIL_REGISTERED), StatusCode::CONFLICT, "conflict"),
            (
                DomainError::unauthorized(MSG_UNAUTHORIZED),
                StatusCode::UNAUTHORIZED,
                "unauthorized",
            ),
            (
                DomainError::wrong_credential(MSG_WRONG_PASSWORD),
                StatusCode::UNAUTHORIZED,
                "wrong_credential",
            ),
            (
                DomainError::email_not_registered(MSG_EMAIL_NOT_REGISTERED),
                StatusCode::UNAUTHORIZED,
                "email_not_registered",
            ),
            (
                DomainError::validation("name must not be empty"),
                StatusCode::BAD_REQUEST,
                "validation_failed",
            ),
        ];

        for (domain_err, status, code) in cases {
            let api_err = ApiError::from(domain_err);
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.code(), code);
        }
    }

    #[test]
    fn test_server_faults_are_generic() {
        for domain_err in [
            DomainError::storage("connection refused at 10.0.0.3"),
            DomainError::cache("corrupt entry"),
            DomainError::internal("hash failure"),
            DomainError::configuration("bad url"),
        ] {
            let api_err = ApiError::from(domain_err);

            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.code(), "server_error");
            assert_eq!(api_err.message(), MSG_SERVER_ERROR);
        }
    }

    #[test]
    fn test_messages_pass_through() {
        let api_err = ApiError::from(DomainError::account_not_found());
        assert_eq!(api_err.message(), "Account not found");

        let api_err = ApiError::from(DomainError::wrong_credential(MSG_WRONG_PASSWORD));
        assert_eq!(api_err.message(), "Password incorrect");
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::invalid_path_parameter();
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["code"], "invalid_path_parameter");
        assert_eq!(json["error"]["message"], "Invalid url path parameter");
    }

    #[test]
    fn test_rate_limited() {
        let err = ApiError::rate_limited();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.code(), "rate_limited");
    }
}
