//! Authentication module
//!
//! Argon2 password hashing, JWT session tokens, and the password/bearer
//! credential strategies that resolve a request to a user.

mod jwt;
mod middleware;
mod password;
mod strategy;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use strategy::{Authenticator, Credential};
