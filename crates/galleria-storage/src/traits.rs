//! Blob storage abstraction trait
//!
//! This module defines the `BlobStorage` trait that all storage backends
//! must implement, and the error type shared by them.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Unknown storage target: {0}")]
    UnknownTarget(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte stream yielded by `open_stream`.
pub type BlobStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// The actual location and size of a blob after a successful write.
///
/// `size_bytes` is measured from the bytes written, not taken from caller
/// input, so the asset row can never record a wrong length.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Key within the backend, e.g. `gallery/{uuid}.png`.
    pub storage_path: String,
    /// Basename of the key; recorded as the asset's `filename`.
    pub filename: String,
    /// Byte length actually written.
    pub size_bytes: i64,
}

/// Blob storage abstraction trait
///
/// All storage backends (local filesystem, S3-compatible) implement this.
/// The catalog layer works against the trait and never learns backend
/// details.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Write `data` to a fresh, collision-free key under the gallery
    /// namespace and return the location actually written.
    ///
    /// Writes are atomic from the caller's perspective: on error no partial
    /// blob remains at the returned key.
    async fn put(&self, data: Vec<u8>, extension: &str) -> StorageResult<StoredBlob>;

    /// Write `data` to a specific key (used by the seeder for stable sample
    /// paths). Same atomicity as `put`.
    async fn put_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<StoredBlob>;

    /// Open the blob at `storage_key` for streaming reads.
    ///
    /// Returns `NotFound` when no blob exists at the key. A metadata row
    /// pointing at a deleted blob reaches this path, so callers map it to a
    /// not-found response rather than a server error.
    async fn open_stream(&self, storage_key: &str) -> StorageResult<BlobStream>;

    /// Delete the blob at `storage_key`. Idempotent: deleting an absent
    /// blob succeeds, so the call is safe to retry.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Whether a blob exists at `storage_key`.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL for the key. Pure function of the key and the backend's
    /// current base configuration; never persisted.
    fn url(&self, storage_key: &str) -> String;

    /// Backend kind served by this implementation.
    fn backend_type(&self) -> StorageBackend;
}
