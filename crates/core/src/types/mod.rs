//! Core types for the showcase.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod admin;
pub mod id;
pub mod patch;
pub mod price;
pub mod rating;
pub mod settings_kind;
pub mod text;

pub use admin::AdminIdentity;
pub use id::{InvalidIdentifier, ResourceId};
pub use patch::Patch;
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
pub use settings_kind::SettingsKind;
pub use text::{CustomerName, ProductName, ReviewText, TextError};
