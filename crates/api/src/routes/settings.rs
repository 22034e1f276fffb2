//! Site settings, carousel and feature card handlers.
//!
//! Reads never fail for lack of data: absent records come back as empty
//! settings, an empty carousel, or the built-in feature cards.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    models::{CarouselSlide, CarouselUpdate, FeatureCard, FeatureCardsUpdate, SiteSettings},
    state::AppState,
};

use super::ApiJson;

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(state.settings().site_settings().await?))
}

#[instrument(skip_all)]
pub async fn replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(settings): ApiJson<SiteSettings>,
) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(
        state.settings().put_site_settings(settings, &admin).await?,
    ))
}

#[instrument(skip(state))]
pub async fn carousel(State(state): State<AppState>) -> Result<Json<Vec<CarouselSlide>>, AppError> {
    Ok(Json(state.settings().carousel().await?))
}

#[instrument(skip_all)]
pub async fn replace_carousel(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(update): ApiJson<CarouselUpdate>,
) -> Result<Json<Vec<CarouselSlide>>, AppError> {
    Ok(Json(state.settings().put_carousel(update, &admin).await?))
}

#[instrument(skip(state))]
pub async fn features(State(state): State<AppState>) -> Result<Json<Vec<FeatureCard>>, AppError> {
    Ok(Json(state.settings().feature_cards().await?))
}

#[instrument(skip_all)]
pub async fn replace_features(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(update): ApiJson<FeatureCardsUpdate>,
) -> Result<Json<Vec<FeatureCard>>, AppError> {
    Ok(Json(
        state.settings().put_feature_cards(update, &admin).await?,
    ))
}
