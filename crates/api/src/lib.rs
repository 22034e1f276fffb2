//! Showcase API - products, reviews, site settings and image uploads.
//!
//! Public reads, admin-only writes. Writes are gated by HTTP Basic
//! credentials compared against a single configured admin; there are no
//! sessions.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `PostgreSQL` JSONB document store (in-memory store for tests)
//! - Cloudinary for image hosting
//! - Sentry and `tracing` for observability

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::AppError;
pub use state::AppState;
