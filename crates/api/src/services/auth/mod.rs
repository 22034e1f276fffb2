//! Credential gate.
//!
//! Grants the single admin capability when a presented username and password
//! match the configured pair. There is no session state: every mutating
//! request presents credentials again.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use showcase_core::AdminIdentity;

use crate::config::AdminCredentials;

/// Verifies presented credentials against the configured admin pair.
pub struct CredentialGate {
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialGate {
    /// Create a gate for the configured admin.
    #[must_use]
    pub fn new(credentials: &AdminCredentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }

    /// Check a presented username/password pair.
    ///
    /// Both fields are always compared, so the time taken does not reveal
    /// which one was wrong.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless both match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AdminIdentity, AuthError> {
        let username_ok = constant_time_eq(username, &self.username);
        let password_ok = constant_time_eq(password, self.password.expose_secret());

        if username_ok & password_ok {
            debug!(username = %self.username, "Admin credentials accepted");
            Ok(AdminIdentity::verified(self.username.clone()))
        } else {
            warn!("Rejected admin credentials");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Compare two strings in time independent of their contents.
///
/// Both sides are hashed first so the comparison always runs over 32 bytes,
/// whatever the presented length.
fn constant_time_eq(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gate() -> CredentialGate {
        CredentialGate::new(&AdminCredentials {
            username: "admin".to_owned(),
            password: SecretString::from("correct horse battery"),
        })
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("hello", "hello"));
        assert!(!constant_time_eq("hello", "world"));
        assert!(!constant_time_eq("hello", "hell"));
        assert!(!constant_time_eq("", "a"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_valid_credentials_grant_identity() {
        let identity = gate().authenticate("admin", "correct horse battery").unwrap();
        assert_eq!(identity.username(), "admin");
    }

    #[test]
    fn test_either_field_wrong_is_rejected() {
        let gate = gate();
        assert_eq!(
            gate.authenticate("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            gate.authenticate("root", "correct horse battery"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(gate.authenticate("", ""), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", gate());
        assert!(!debug.contains("battery"));
        assert!(debug.contains("[REDACTED]"));
    }
}
