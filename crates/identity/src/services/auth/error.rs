//! Authentication error types.

use thiserror::Error;

use crate::directory::RepositoryError;
use crate::services::sessions::SessionError;

/// Errors that can occur during authentication operations.
///
/// Everything is returned as a typed result to the caller; the UI
/// collaborator owns user-facing messaging, and nothing here is retried
/// automatically.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] stockist_core::EmailError),

    /// Identifier/secret pair does not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an already-registered email. Surfaced before any
    /// partial write occurs.
    #[error("email already registered")]
    DuplicateEmail,

    /// Registration with an empty secret.
    #[error("secret cannot be empty")]
    EmptySecret,

    /// The presented session token is unknown, revoked, or past its TTL.
    #[error("session expired")]
    SessionExpired,

    /// Registry error (not-found, consistency violation).
    #[error("registry error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => Self::InvalidCredentials,
            SessionError::Expired => Self::SessionExpired,
        }
    }
}
