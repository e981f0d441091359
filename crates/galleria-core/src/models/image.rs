use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A gallery image: one metadata row pointing at one blob.
///
/// `filename`, `original_name`, `mime_type`, `size_bytes`, `storage_target`,
/// and `storage_path` are set once at creation from the blob actually
/// written; only `title` and `description` change afterwards. The public URL
/// is not a field here: it is derived from `(storage_target, storage_path)`
/// at serialization time, so it tracks storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ImageAsset {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub filename: String,
    pub original_name: Option<String>,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_target: String,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageAsset {
    /// Filename offered to clients on download: the uploader's name when
    /// known, the stored name otherwise.
    pub fn display_filename(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.filename)
    }
}

/// Column values for a new asset row.
///
/// Storage fields come from the blob store's returned ref, never from the
/// client, so the row can only ever describe a blob that was actually
/// written.
#[derive(Debug, Clone)]
pub struct NewImageAsset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub filename: String,
    pub original_name: Option<String>,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_target: String,
    pub storage_path: String,
}

/// Partial metadata update. Each field is tri-state: absent leaves the
/// column untouched, an explicit `null` clears it, a string replaces it.
/// No storage-related field is updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateImageMetadata {
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Distinguishes a missing key from an explicit `null`: the outer Option is
/// presence, the inner one the value.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateImageMetadata {
    /// A request with neither field is a no-op update; still valid, and
    /// still bumps `updated_at`, matching a blank form submission.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// API representation of an asset: the stored row plus the derived `url`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageAssetResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub filename: String,
    pub original_name: Option<String>,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_target: String,
    pub storage_path: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageAssetResponse {
    pub fn from_asset(asset: ImageAsset, url: String) -> Self {
        Self {
            id: asset.id,
            title: asset.title,
            description: asset.description,
            filename: asset.filename,
            original_name: asset.original_name,
            mime_type: asset.mime_type,
            size_bytes: asset.size_bytes,
            storage_target: asset.storage_target,
            storage_path: asset.storage_path,
            url,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
        }
    }
}

/// One page of a listing, newest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}
