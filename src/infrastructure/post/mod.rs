//! Post infrastructure - cached repository and use cases

mod cached_repository;
mod service;

pub use cached_repository::CachedPostRepository;
pub use service::{PostContentRequest, PostService};
