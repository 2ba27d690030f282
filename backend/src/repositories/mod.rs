//! Data access layer
//!
//! Repositories are traits so the same services run against PostgreSQL in
//! production and against [`InMemoryStore`] in tests.

pub mod memory;
pub mod movie;
pub mod user;

pub use memory::{demo_catalog, InMemoryStore};
pub use movie::{MovieRepository, PgMovieRepository};
pub use user::{NewUser, PgUserRepository, UserChanges, UserRecord, UserRepository};
