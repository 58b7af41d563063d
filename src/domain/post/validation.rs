//! Post validation utilities

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PostValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title exceeds maximum length of {0} characters")]
    TitleTooLong(usize),

    #[error("Body cannot be empty")]
    EmptyBody,
}

pub const MAX_TITLE_LENGTH: usize = 255;

pub fn validate_title(title: &str) -> Result<(), PostValidationError> {
    if title.trim().is_empty() {
        return Err(PostValidationError::EmptyTitle);
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PostValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    Ok(())
}

pub fn validate_body(body: &str) -> Result<(), PostValidationError> {
    if body.trim().is_empty() {
        return Err(PostValidationError::EmptyBody);
    }

    Ok(())
}
