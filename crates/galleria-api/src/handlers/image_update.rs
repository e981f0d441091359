use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use galleria_core::models::{ImageAssetResponse, UpdateImageMetadata};
use galleria_core::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Update an image's title and/or description.
///
/// Fields absent from the body keep their current value; an explicit `null`
/// clears the field. The file itself and its storage coordinates never
/// change through this endpoint; replacing the image means deleting and
/// re-uploading.
#[utoipa::path(
    put,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    request_body = UpdateImageMetadata,
    responses(
        (status = 200, description = "Updated image metadata", body = ImageAssetResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, update), fields(operation = "update_image", image_id = %id))]
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<UpdateImageMetadata>,
) -> Result<Json<ImageAssetResponse>, HttpAppError> {
    update.validate().map_err(HttpAppError::from)?;

    let asset = state
        .images
        .update_metadata(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    tracing::info!(image_id = %asset.id, "Image metadata updated");

    let url = state
        .storage
        .url(&asset.storage_target, &asset.storage_path)?;
    Ok(Json(ImageAssetResponse::from_asset(asset, url)))
}
