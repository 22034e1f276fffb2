//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. `CorsLayer`
//! 4. `TimeoutLayer` (uniform per-request deadline)
//! 5. Security headers
//!
//! Authentication is not a layer: mutating handlers take the
//! [`RequireAdmin`] extractor.

pub mod auth;

pub use auth::RequireAdmin;

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Add security headers to every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
