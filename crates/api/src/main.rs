//! Showcase API server.
//!
//! Serves the JSON API on `SHOWCASE_HOST:SHOWCASE_PORT` (default
//! `127.0.0.1:8000`).
//!
//! # Start-up
//!
//! 1. Load configuration from the environment (`.env` honoured)
//! 2. Initialise Sentry (when `SENTRY_DSN` is set) and tracing
//! 3. Connect to `PostgreSQL`; failure aborts start-up
//! 4. Serve until Ctrl+C / SIGTERM
//!
//! Migrations are NOT run automatically. Run them explicitly via:
//! `cargo run -p showcase-cli -- migrate`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentry::integrations::tracing as sentry_tracing;
use showcase_api::{
    ApiConfig, AppState,
    db::{self, PgDocumentStore},
    media::{CloudinaryClient, MediaHost, UnconfiguredMediaHost},
    routes,
};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            send_default_pii: false,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Pick the media host: Cloudinary when configured, otherwise one that
/// refuses every call.
fn media_host(config: &ApiConfig) -> Arc<dyn MediaHost> {
    match config.cloudinary() {
        Some(cloudinary) => Arc::new(
            CloudinaryClient::new(cloudinary).expect("Failed to create Cloudinary client"),
        ),
        None => {
            tracing::warn!("Cloudinary is not configured; uploads will fail");
            Arc::new(UnconfiguredMediaHost)
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "showcase_api=info,tower_http=debug".into());

    // JSON for log aggregation, text locally
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer =
        json_logs.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    let store = Arc::new(PgDocumentStore::new(pool));
    let media = media_host(&config);
    let addr = config.socket_addr();

    let state = AppState::new(config, store, media);

    let app = routes::app(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("showcase-api listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
