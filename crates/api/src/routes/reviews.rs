//! Review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    models::{NewReview, Review, ReviewPatch},
    state::AppState,
};

use super::ApiJson;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.reviews().list().await?))
}

#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.reviews().list_featured().await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.reviews().get_by_id(&id).await?))
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<NewReview>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = state.reviews().create(input, &admin).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state, admin, patch))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ReviewPatch>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.reviews().update(&id, patch, &admin).await?))
}

#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.reviews().delete(&id, &admin).await?;
    Ok(StatusCode::NO_CONTENT)
}
