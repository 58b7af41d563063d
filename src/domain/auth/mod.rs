//! Authentication and authorization domain

mod context;
pub mod gate;
mod ports;

pub use context::{Caller, RequestContext};
pub use ports::{IssuedToken, PasswordHasher, TokenService};

#[cfg(test)]
pub use ports::{MockPasswordHasher, MockTokenService};
