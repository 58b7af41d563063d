//! Limit/offset pagination

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated page window.
///
/// `limit` never exceeds the maximum it was built with and neither field is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Build a page from raw query values.
    ///
    /// A missing limit falls back to `default_limit`; a limit above `max_limit` is clamped.
    /// Negative values are rejected.
    pub fn new(
        limit: Option<i64>,
        offset: Option<i64>,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, DomainError> {
        let limit = match limit {
            None => default_limit.min(max_limit),
            Some(l) if l < 0 => {
                return Err(DomainError::validation("limit must not be negative"));
            }
            Some(l) => u32::try_from(l).unwrap_or(u32::MAX).min(max_limit),
        };

        let offset = match offset {
            None => 0,
            Some(o) if o < 0 => {
                return Err(DomainError::validation("offset must not be negative"));
            }
            Some(o) => u32::try_from(o)
                .map_err(|_| DomainError::validation("offset is too large"))?,
        };

        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}
