//! Authentication infrastructure: password hashing, tokens and login

mod jwt;
mod password;
mod service;

pub use jwt::{JwtClaims, JwtConfig, JwtService, DEV_JWT_SECRET};
pub use password::Argon2Hasher;
pub use service::AuthService;
