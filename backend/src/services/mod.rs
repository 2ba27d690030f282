//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth layer.

pub mod movie;
pub mod user;

pub use movie::MovieService;
pub use user::UserService;
