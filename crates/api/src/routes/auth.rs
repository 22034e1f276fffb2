//! Credential check endpoints.
//!
//! Both endpoints exist so a client can confirm a username/password pair
//! before using it on writes. Neither creates a session.

use axum::Json;
use serde::Serialize;

use crate::middleware::RequireAdmin;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

pub async fn login(RequireAdmin(admin): RequireAdmin) -> Json<LoginResponse> {
    tracing::info!(username = %admin, "Admin login");
    Json(LoginResponse {
        message: "Login successful",
        username: admin.username().to_owned(),
    })
}

pub async fn verify(RequireAdmin(admin): RequireAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        username: admin.username().to_owned(),
    })
}
