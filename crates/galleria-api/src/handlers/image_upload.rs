use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use galleria_core::models::{ImageAssetResponse, NewImageAsset};
use galleria_core::{AppError, UploadValidator, ValidationError};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Fields extracted from the upload form.
#[derive(Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    file_bytes: Option<Vec<u8>>,
    original_name: Option<String>,
    client_content_type: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, HttpAppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("title") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Invalid title field: {}", e)))?;
                if !value.is_empty() {
                    form.title = Some(value);
                }
            }
            Some("description") => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Invalid description field: {}", e))
                })?;
                if !value.is_empty() {
                    form.description = Some(value);
                }
            }
            Some("image") => {
                form.original_name = field.file_name().map(String::from);
                form.client_content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Invalid image field: {}", e)))?;
                form.file_bytes = Some(bytes.to_vec());
            }
            // Unknown fields are drained and ignored.
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

/// Upload a new gallery image.
///
/// The blob is written to storage first; the metadata row is inserted only
/// after the write succeeds, so a row can never point at a blob that was
/// not stored. If the insert fails after the write, the orphaned blob is
/// logged and left for offline cleanup.
#[utoipa::path(
    post,
    path = "/images",
    tag = "images",
    responses(
        (status = 201, description = "Image created", body = ImageAssetResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ImageAssetResponse>), HttpAppError> {
    let form = read_upload_form(multipart).await?;

    let validator = UploadValidator::default();
    if let Some(title) = &form.title {
        validator.validate_title(title)?;
    }

    let data = form.file_bytes.ok_or(ValidationError::MissingFile)?;
    let format = validator.validate_image_bytes(&data)?;

    // The sniffed format decides the stored extension; the client's claimed
    // content type is recorded when present, the sniffed one otherwise.
    let extension = format.extensions_str().first().copied().unwrap_or("bin");
    let mime_type = form
        .client_content_type
        .unwrap_or_else(|| format.to_mime_type().to_string());

    let backend = state.storage.default_backend();
    let blob = backend.put(data, extension).await?;

    let new_asset = NewImageAsset {
        title: form.title,
        description: form.description,
        filename: blob.filename,
        original_name: form.original_name,
        mime_type,
        size_bytes: blob.size_bytes,
        storage_target: state.storage.default_target().to_string(),
        storage_path: blob.storage_path.clone(),
    };

    let asset = match state.images.insert(new_asset).await {
        Ok(asset) => asset,
        Err(e) => {
            // The blob stays behind without a row; log its key so it can be
            // reclaimed by an offline sweep.
            tracing::warn!(
                error = %e,
                storage_path = %blob.storage_path,
                "Metadata insert failed after blob write; orphaned blob left in storage"
            );
            return Err(e.into());
        }
    };

    tracing::info!(
        image_id = %asset.id,
        size_bytes = asset.size_bytes,
        mime_type = %asset.mime_type,
        "Image uploaded"
    );

    let url = state
        .storage
        .url(&asset.storage_target, &asset.storage_path)?;
    Ok((
        StatusCode::CREATED,
        Json(ImageAssetResponse::from_asset(asset, url)),
    ))
}
