//! Shared request/response plumbing for the HTTP layer

pub mod error;
pub mod extract;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use extract::{ListQuery, Path, Query};
pub use json::{Json, ValidatedJson};
