use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use galleria_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete an image: blob first, then the metadata row.
///
/// The blob is removed before the row so a storage failure leaves the asset
/// fully intact and the request retryable. Blob removal treats an
/// already-absent blob as success, so a retry after a partial failure still
/// converges.
#[utoipa::path(
    delete,
    path = "/images/{id}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image deleted", body = DeleteResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_image", image_id = %id))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let asset = state
        .images
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let backend = state.storage.get(&asset.storage_target)?;
    backend.delete(&asset.storage_path).await?;

    let removed = state.images.delete_row(id).await?;
    if !removed {
        // Row vanished between fetch and delete; the blob is already gone,
        // so the asset no longer exists either way.
        return Err(HttpAppError(AppError::NotFound(
            "Image not found".to_string(),
        )));
    }

    tracing::info!(
        image_id = %id,
        storage_path = %asset.storage_path,
        "Image deleted"
    );

    Ok(Json(DeleteResponse {
        message: "Deleted".to_string(),
    }))
}
