//! Post domain

mod entity;
mod repository;
mod validation;

pub use entity::{Author, NewPost, Post, PostId};
pub use repository::{PostRepository, PostStore};
pub use validation::{validate_body, validate_title, PostValidationError};

#[cfg(test)]
pub use repository::{MockPostRepository, MockPostStore};
