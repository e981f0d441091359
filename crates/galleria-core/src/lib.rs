//! Galleria Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload validation shared across all Galleria components. It is free of
//! I/O: persistence lives in `galleria-db`, blob storage in
//! `galleria-storage`, and the HTTP surface in `galleria-api`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::{UploadValidator, ValidationError};
