//! Credential gate error types.

use thiserror::Error;

/// Reasons a request is refused the admin capability.
///
/// Both variants render as 401. The message never says which of username
/// or password was wrong.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization: Basic` header was presented.
    #[error("Not authenticated")]
    MissingCredentials,

    /// Credentials were presented but did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,
}
