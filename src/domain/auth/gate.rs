//! Authorization gate
//!
//! Ownership is always checked against the stored record's owner, never against request
//! payload.

use super::context::{Caller, RequestContext};
use crate::domain::account::AccountId;
use crate::domain::error::MSG_UNAUTHORIZED;
use crate::domain::DomainError;

/// True iff the request carries a verified identity equal to `owner`
pub fn is_owner(ctx: &RequestContext, owner: AccountId) -> bool {
    ctx.caller()
        .is_some_and(|caller| caller.account_id() == owner)
}

/// Any verified identity will do
pub fn require_caller(ctx: &RequestContext) -> Result<Caller, DomainError> {
    ctx.caller()
        .copied()
        .ok_or_else(|| DomainError::unauthorized(MSG_UNAUTHORIZED))
}

/// The verified identity must own the resource
pub fn authorize_owner(ctx: &RequestContext, owner: AccountId) -> Result<Caller, DomainError> {
    let caller = require_caller(ctx)?;

    if !is_owner(ctx, owner) {
        return Err(DomainError::unauthorized(MSG_UNAUTHORIZED));
    }

    Ok(caller)
}
