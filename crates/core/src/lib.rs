//! Showcase Core - Shared types library.
//!
//! This crate provides common types used across all showcase components:
//! - `api` - The HTTP API serving products, reviews and site settings
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, prices, ratings, bounded
//!   text, partial-update fields and the settings discriminator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
