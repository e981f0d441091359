use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use galleria_core::constants::PAGE_SIZE;
use galleria_core::models::{ImageAssetResponse, Page};
use serde::Deserialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
}

/// List gallery images, newest first, 20 per page.
#[utoipa::path(
    get,
    path = "/images",
    tag = "images",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number, defaults to 1")
    ),
    responses(
        (status = 200, description = "One page of images", body = Page<ImageAssetResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ImageAssetResponse>>, HttpAppError> {
    // Out-of-range page numbers clamp rather than error; a page past the
    // end comes back empty with the true total.
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * PAGE_SIZE;

    let assets = state.images.list(PAGE_SIZE, offset).await?;
    let total = state.images.count().await?;

    let mut items = Vec::with_capacity(assets.len());
    for asset in assets {
        let url = state
            .storage
            .url(&asset.storage_target, &asset.storage_path)?;
        items.push(ImageAssetResponse::from_asset(asset, url));
    }

    Ok(Json(Page::new(items, page, PAGE_SIZE, total)))
}
