use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use galleria_core::AppError;
use galleria_storage::StorageError;
use std::sync::Arc;
use uuid::Uuid;

/// A filename is quotable in Content-Disposition only if it is printable
/// ASCII with no quote or backslash; anything else would corrupt the header.
fn is_header_safe(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\')
}

/// Serve the image file itself, streamed from storage.
///
/// Served inline for in-page display rather than as a download. Blobs are
/// immutable once written, so the response is cacheable indefinitely.
#[utoipa::path(
    get,
    path = "/images/{id}/file",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image file", content_type = "application/octet-stream"),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "serve_image", image_id = %id))]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let asset = state
        .images
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    tracing::debug!(storage_path = %asset.storage_path, "Streaming file from storage");

    let backend = state.storage.get(&asset.storage_target)?;
    let stream = backend
        .open_stream(&asset.storage_path)
        .await
        .map_err(|e| match e {
            // A row pointing at a missing blob renders as not-found, not as
            // a server fault; the row itself may still be deleted normally.
            StorageError::NotFound(_) => {
                tracing::warn!(
                    image_id = %id,
                    storage_path = %asset.storage_path,
                    "Asset row references a missing blob"
                );
                HttpAppError(AppError::NotFound("Image file not found".to_string()))
            }
            other => other.into(),
        })?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    // Uploader-supplied names can carry characters that are not valid in a
    // header; fall back to the storage-generated name for those.
    let disposition_name = if is_header_safe(asset.display_filename()) {
        asset.display_filename()
    } else {
        &asset.filename
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.mime_type.clone())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", disposition_name),
        )
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe_filename() {
        assert!(is_header_safe("sunset.png"));
        assert!(is_header_safe("my holiday photo (1).jpg"));
        assert!(!is_header_safe(""));
        assert!(!is_header_safe("quo\"te.png"));
        assert!(!is_header_safe("back\\slash.png"));
        assert!(!is_header_safe("line\nbreak.png"));
        assert!(!is_header_safe("smörgås.png"));
    }
}
