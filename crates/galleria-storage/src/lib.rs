//! Galleria Storage Library
//!
//! Blob storage abstraction and implementations: the `BlobStorage` trait, a
//! local filesystem backend, an S3-compatible backend, and the
//! `StorageRouter` that maps a record's `storage_target` name to a backend.
//!
//! # Storage key format
//!
//! All blobs live under the `gallery/` namespace. New blobs get a
//! `gallery/{uuid}.{ext}` key so concurrent writes can never collide; the
//! key is generated by the backend, never supplied by a caller. Keys must
//! not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, StorageRouter};
pub use galleria_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{BlobStorage, BlobStream, StorageError, StorageResult, StoredBlob};
