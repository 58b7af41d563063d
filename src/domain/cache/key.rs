//! Cache key layout
//!
//! One namespace per entity type plus a lookup kind. The two account keys are independent
//! entries for the same row and are always invalidated together.

use std::fmt;

use crate::domain::account::AccountId;
use crate::domain::post::PostId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    AccountById(AccountId),
    AccountByEmail(String),
    PostById(PostId),
}

impl CacheKey {
    pub fn account(id: AccountId) -> Self {
        Self::AccountById(id)
    }

    pub fn account_email(email: impl Into<String>) -> Self {
        Self::AccountByEmail(email.into())
    }

    pub fn post(id: PostId) -> Self {
        Self::PostById(id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountById(id) => write!(f, "account:{}", id),
            Self::AccountByEmail(email) => write!(f, "account:email:{}", email),
            Self::PostById(id) => write!(f, "post:{}", id),
        }
    }
}
