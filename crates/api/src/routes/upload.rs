//! Image upload handlers.

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
    },
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::{
    error::AppError, media::UploadedImage, middleware::RequireAdmin, services::upload,
    state::AppState,
};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Forward the `file` part of a multipart body to the media host.
#[instrument(skip_all, fields(admin = %admin))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedImage>, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_owned();
        upload::check_content_type(&content_type)?;

        let bytes = field.bytes().await?;
        let image = state.uploads().upload(bytes, &content_type, &admin).await?;
        return Ok(Json(image));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// Delete an image by its host identifier. Identifiers may contain `/`.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(public_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.uploads().delete(&public_id, &admin).await?;
    Ok(Json(json!({ "message": "Image deleted successfully" })))
}
