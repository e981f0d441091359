//! Storage setup.

use anyhow::{Context, Result};
use galleria_core::Config;
use galleria_storage::{create_storage, StorageRouter};
use std::sync::Arc;

/// Build the storage router for the configured backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<StorageRouter>> {
    let router = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %config.storage_backend(),
        target = %router.default_target(),
        "Storage initialized"
    );

    Ok(Arc::new(router))
}
