//! Account domain
//!
//! Account entity, validation rules and the store/repository ports.

mod entity;
mod repository;
mod validation;

pub use entity::{Account, AccountId, NewAccount};
pub use repository::{AccountRepository, AccountStore};
pub use validation::{
    normalize_email, validate_email, validate_name, validate_password, AccountValidationError,
    MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::{MockAccountRepository, MockAccountStore};
