//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Service banner
//! GET  /health                   - Liveness
//! GET  /health/ready             - Readiness (store ping)
//!
//! GET  /api/health               - API health payload
//!
//! # Products (writes require admin)
//! GET    /api/products           - Up to 100, newest first
//! POST   /api/products           - Create
//! GET    /api/products/featured  - Up to 10 featured
//! GET    /api/products/{id}      - Detail
//! PUT    /api/products/{id}      - Partial update
//! DELETE /api/products/{id}      - Delete
//!
//! # Reviews (same shape as products)
//! /api/reviews ...
//!
//! # Settings (writes require admin)
//! GET/PUT /api/settings           - Site settings
//! GET/PUT /api/settings/carousel  - Carousel slides
//! GET/PUT /api/settings/features  - Feature cards
//!
//! # Uploads (admin)
//! POST   /api/upload             - Multipart `file` to the media host
//! DELETE /api/upload/{*id}       - Delete from the media host
//!
//! # Auth (admin)
//! POST /api/auth/login           - Check credentials
//! GET  /api/auth/verify          - Check credentials
//! ```

pub mod auth;
pub mod health;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod upload;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRequest},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::error::AppError;
use crate::middleware;
use crate::state::AppState;

/// Body limit on the upload route. Larger than the gateway ceiling so the
/// gateway, not the transport, answers oversized images.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// JSON body extractor whose rejection renders as a `{"detail"}` 400.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/featured", get(products::featured))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index).post(reviews::create))
        .route("/featured", get(reviews::featured))
        .route(
            "/{id}",
            get(reviews::show)
                .put(reviews::update)
                .delete(reviews::delete),
        )
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::show).put(settings::replace))
        .route(
            "/carousel",
            get(settings::carousel).put(settings::replace_carousel),
        )
        .route(
            "/features",
            get(settings::features).put(settings::replace_features),
        )
}

/// Create the upload routes router.
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::create))
        .route("/{*public_id}", axum::routing::delete(upload::delete))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/verify", get(auth::verify))
}

/// Create all routes under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::api_health))
        .nest("/products", product_routes())
        .nest("/reviews", review_routes())
        .nest("/settings", settings_routes())
        .nest("/upload", upload_routes())
        .nest("/auth", auth_routes())
}

/// Build the application with CORS, timeout and security headers.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().allowed_origins);

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config().request_timeout);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum::middleware::map_response(render_timeout))
                .layer(timeout)
                .layer(axum::middleware::from_fn(middleware::security_headers)),
        )
        .with_state(state)
}

/// CORS for the configured front-end origins. Invalid origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn not_found() -> (StatusCode, axum::Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "detail": "Not Found" })),
    )
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Give the bare timeout response a `{"detail"}` body.
async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return AppError::Timeout.into_response();
    }
    response
}
