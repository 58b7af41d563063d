//! Request-scoped caller identity

use crate::domain::account::AccountId;

/// Identity proven by a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    account_id: AccountId,
}

impl Caller {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }
}

/// Built once per inbound request and passed by reference into the services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    caller: Option<Caller>,
}

impl RequestContext {
    /// Context for a request without a verified identity
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn authenticated(caller: Caller) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }
}

impl From<Caller> for RequestContext {
    fn from(caller: Caller) -> Self {
        Self::authenticated(caller)
    }
}
