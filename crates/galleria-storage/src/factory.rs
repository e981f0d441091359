#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{BlobStorage, StorageBackend, StorageError, StorageResult};
use galleria_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

/// Routes blob operations to the backend registered under a target name.
///
/// New blobs are always written through the default target; reads and
/// deletes go to whichever target the asset row names, so records written
/// under an earlier configuration keep resolving. URLs are derived here at
/// read time and never persisted.
pub struct StorageRouter {
    targets: HashMap<String, Arc<dyn BlobStorage>>,
    default_target: String,
}

impl StorageRouter {
    pub fn new(default_target: impl Into<String>, backend: Arc<dyn BlobStorage>) -> Self {
        let default_target = default_target.into();
        let mut targets = HashMap::new();
        targets.insert(default_target.clone(), backend);
        StorageRouter {
            targets,
            default_target,
        }
    }

    /// Target name recorded on newly created assets.
    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Backend that receives new writes.
    pub fn default_backend(&self) -> &Arc<dyn BlobStorage> {
        // The constructor guarantees the default target is registered.
        &self.targets[&self.default_target]
    }

    /// Backend for a target recorded on an existing asset.
    pub fn get(&self, target: &str) -> StorageResult<&Arc<dyn BlobStorage>> {
        self.targets
            .get(target)
            .ok_or_else(|| StorageError::UnknownTarget(target.to_string()))
    }

    /// Public URL for a blob, derived from the target's current base
    /// configuration.
    pub fn url(&self, target: &str, storage_key: &str) -> StorageResult<String> {
        Ok(self.get(target)?.url(storage_key))
    }
}

/// Create the storage router based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<StorageRouter> {
    let backend = config.storage_backend();

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(StorageRouter::new(backend.as_str(), Arc::new(storage)))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url =
                config
                    .local_storage_base_url()
                    .map(String::from)
                    .ok_or_else(|| {
                        StorageError::ConfigError(
                            "LOCAL_STORAGE_BASE_URL not configured".to_string(),
                        )
                    })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(StorageRouter::new(backend.as_str(), Arc::new(storage)))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
