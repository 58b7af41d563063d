use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Wrong credential: {message}")]
    WrongCredential { message: String },

    #[error("Email not registered: {message}")]
    EmailNotRegistered { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub const MSG_ACCOUNT_NOT_FOUND: &str = "Account not found";
pub const MSG_POST_NOT_FOUND: &str = "Post not found";
pub const MSG_EMAIL_REGISTERED: &str = "Email already in use";
pub const MSG_ACCOUNT_HAS_POSTS: &str = "Account still has posts";
pub const MSG_EMAIL_NOT_REGISTERED: &str = "Email not registered";
pub const MSG_WRONG_PASSWORD: &str = "Password incorrect";
pub const MSG_UNAUTHORIZED: &str = "You are not authorized to perform this action";

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn wrong_credential(message: impl Into<String>) -> Self {
        Self::WrongCredential {
            message: message.into(),
        }
    }

    pub fn email_not_registered(message: impl Into<String>) -> Self {
        Self::EmailNotRegistered {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn account_not_found() -> Self {
        Self::not_found(MSG_ACCOUNT_NOT_FOUND)
    }

    pub fn post_not_found() -> Self {
        Self::not_found(MSG_POST_NOT_FOUND)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors caused by infrastructure rather than by the caller.
    ///
    /// These are logged and reported to clients as a generic server fault.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::Cache { .. } | Self::Configuration { .. } | Self::Internal { .. }
        )
    }
}
