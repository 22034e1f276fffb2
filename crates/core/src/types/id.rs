//! Opaque resource identifiers.
//!
//! Identifiers are assigned by the document store and travel through the API
//! as strings. A [`ResourceId`] can only be obtained by parsing, so a value of
//! this type is always well-formed and safe to hand to the store layer.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Error returned when a presented identifier is malformed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid identifier: {0:?}")]
pub struct InvalidIdentifier(pub String);

/// Store-assigned identifier for a product or review.
///
/// Serializes as its hyphenated string form. The store's native key type is
/// only reachable through [`ResourceId::as_uuid`], which is reserved for the
/// store adapter.
///
/// # Example
///
/// ```
/// use showcase_core::ResourceId;
///
/// let id = ResourceId::generate();
/// let parsed = ResourceId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
///
/// assert!(ResourceId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Parse an identifier presented by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if the input is not a well-formed id.
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| InvalidIdentifier(s.to_owned()))
    }

    /// Allocate a fresh identifier. Used by store adapters on insert.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a native store key.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The native store key.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for ResourceId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Type<::sqlx::Postgres> for ResourceId {
    fn type_info() -> ::sqlx::postgres::PgTypeInfo {
        <Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for ResourceId {
    fn decode(
        value: ::sqlx::postgres::PgValueRef<'r>,
    ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
        let id = <Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Encode<'_, ::sqlx::Postgres> for ResourceId {
    fn encode_by_ref(
        &self,
        buf: &mut ::sqlx::postgres::PgArgumentBuffer,
    ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
