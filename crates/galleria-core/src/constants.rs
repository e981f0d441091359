//! Shared constants.

/// Hard cap on upload payload size: 5 MiB, measured on the raw file bytes.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Fixed page size for asset listings.
pub const PAGE_SIZE: i64 = 20;

/// Maximum length of an asset title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Key namespace under which gallery blobs are stored.
pub const GALLERY_NAMESPACE: &str = "gallery";
