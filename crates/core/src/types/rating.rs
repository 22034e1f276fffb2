//! Review star rating.

use serde::{Deserialize, Serialize};

/// Error returned for a rating outside the accepted range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between {min} and {max} (got {value})", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingError {
    /// The rejected value.
    pub value: i64,
}

/// A star rating from 1 to 5 inclusive.
///
/// ```
/// use showcase_core::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validate a raw rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] unless `MIN <= value <= MAX`.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError { value })
    }

    /// The rating as a number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}
