//! The admin capability.

use core::fmt;

use serde::Serialize;

/// Proof that the current request presented valid admin credentials.
///
/// There is exactly one privilege level, so the identity only carries the
/// username, which write paths record in their logs. Construct it through the
/// credential gate; the constructor is public so that gate can live in another
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdminIdentity(String);

impl AdminIdentity {
    /// Record a verified admin username.
    #[must_use]
    pub fn verified(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// The username that authenticated.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
