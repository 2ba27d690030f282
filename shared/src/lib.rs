//! myFlix Shared Library
//!
//! This crate contains the wire models, request/response types and input
//! validation shared by the API server and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Director, Genre, Movie, User};
pub use types::*;
pub use validation::FieldError;
