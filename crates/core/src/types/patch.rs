//! Tri-state field for partial updates.
//!
//! JSON merge patches need to tell three cases apart: the key is missing
//! (keep the stored value), the key is `null` (clear it), or the key carries a
//! value (overwrite). `Option<T>` collapses the first two, so patch structs
//! use [`Patch<T>`] for fields that may legitimately be cleared.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
///
/// Use with `#[serde(default, skip_serializing_if = "Patch::is_keep")]` so an
/// absent key deserializes to [`Patch::Keep`] and is omitted again on the way
/// to the store.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use showcase_core::Patch;
///
/// #[derive(Deserialize, Serialize)]
/// struct Update {
///     #[serde(default, skip_serializing_if = "Patch::is_keep")]
///     note: Patch<String>,
/// }
///
/// let keep: Update = serde_json::from_str("{}").unwrap();
/// assert_eq!(keep.note, Patch::Keep);
/// assert_eq!(serde_json::to_string(&keep).unwrap(), "{}");
///
/// let clear: Update = serde_json::from_str(r#"{"note": null}"#).unwrap();
/// assert_eq!(clear.note, Patch::Clear);
/// assert_eq!(serde_json::to_string(&clear).unwrap(), r#"{"note":null}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    /// Remove the stored value.
    Clear,
    /// Overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// True when the field was absent from the request.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Borrow the new value, if one was supplied.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Validate or transform a supplied value, leaving `Keep`/`Clear` as-is.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)?),
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Keep | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}
