//! Account infrastructure - cached repository and use cases

mod cached_repository;
mod service;

pub use cached_repository::CachedAccountRepository;
pub use service::{
    AccountService, RegisterAccountRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
