//! Length-bounded text fields.
//!
//! Each newtype enforces the character bounds of one field. Lengths are
//! counted in Unicode scalar values, not bytes, so "✨" counts as one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing bounded text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The input is empty (or only whitespace).
    #[error("{field} cannot be empty")]
    Empty {
        /// Field being validated.
        field: &'static str,
    },
    /// The input is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field being validated.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LENGTH: usize = $max;

            /// Parse and validate the text.
            ///
            /// # Errors
            ///
            /// Returns [`TextError`] if the input is blank or longer than
            /// [`Self::MAX_LENGTH`] characters.
            pub fn parse(s: &str) -> Result<Self, TextError> {
                check_bounds($field, s, Self::MAX_LENGTH)?;
                Ok(Self(s.to_owned()))
            }

            /// Returns the text as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the value and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

bounded_text!(
    /// Product display name (1-200 characters).
    ProductName,
    "name",
    200
);

bounded_text!(
    /// Name of the customer leaving a review (1-100 characters).
    CustomerName,
    "customer_name",
    100
);

bounded_text!(
    /// Body of a customer review (1-500 characters).
    ReviewText,
    "review_text",
    500
);

fn check_bounds(field: &'static str, s: &str, max: usize) -> Result<(), TextError> {
    if s.trim().is_empty() {
        return Err(TextError::Empty { field });
    }
    if s.chars().count() > max {
        return Err(TextError::TooLong { field, max });
    }
    Ok(())
}
