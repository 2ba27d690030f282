//! Error types shared between the server and its clients

use thiserror::Error;

/// Message returned for every failed password login.
///
/// Deliberately identical for unknown usernames and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "incorrect username or password.";

/// Authentication failure reasons
///
/// The reasons are kept apart for server-side logging only. Every variant is
/// reported to the caller as the same 401 outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Missing token")]
    MissingToken,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token subject no longer exists")]
    UnknownSubject,
}

impl AuthError {
    /// Message safe to show to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            _ => "Unauthorized",
        }
    }
}
