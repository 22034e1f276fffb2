//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    models::{NewProduct, Product, ProductPatch},
    state::AppState,
};

use super::ApiJson;

/// Up to 100 products, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products().list().await?))
}

/// Up to 10 featured products, newest first.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products().list_featured().await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products().get_by_id(&id).await?))
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.products().create(input, &admin).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, admin, patch))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products().update(&id, patch, &admin).await?))
}

#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.products().delete(&id, &admin).await?;
    Ok(StatusCode::NO_CONTENT)
}
