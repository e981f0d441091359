use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use galleria_core::models::ImageAssetResponse;
use galleria_core::AppError;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Fetch a single image's metadata, including its derived URL.
#[utoipa::path(
    get,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image metadata", body = ImageAssetResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_image", image_id = %id))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ImageAssetResponse>, HttpAppError> {
    let asset = state
        .images
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let url = state
        .storage
        .url(&asset.storage_target, &asset.storage_path)?;
    Ok(Json(ImageAssetResponse::from_asset(asset, url)))
}
