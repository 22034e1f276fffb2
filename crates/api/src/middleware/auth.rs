//! Admin authentication extractor.
//!
//! Mutating routes take [`RequireAdmin`] as their first argument. It reads
//! HTTP Basic credentials from the `Authorization` header and runs them
//! through the credential gate before the body is even looked at.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use showcase_core::AdminIdentity;

use crate::error::AppError;
use crate::services::AuthError;
use crate::state::AppState;

/// Extractor that requires admin credentials.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (username, password) = basic_credentials(parts).ok_or(AuthError::MissingCredentials)?;
        let admin = state.gate().authenticate(&username, &password)?;
        Ok(Self(admin))
    }
}

/// Decode `Authorization: Basic <base64(username:password)>`.
fn basic_credentials(parts: &Parts) -> Option<(String, String)> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}
