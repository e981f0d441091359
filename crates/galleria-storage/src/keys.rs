//! Shared key generation for storage backends.
//!
//! Key format: `gallery/{uuid}.{ext}`. The uuid makes concurrent writes
//! collision-free; the extension comes from the sniffed image format, never
//! from the client's filename.

use galleria_core::constants::GALLERY_NAMESPACE;
use uuid::Uuid;

/// Generate a fresh gallery key for a blob with the given extension.
pub fn generate_blob_key(extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    format!("{}/{}.{}", GALLERY_NAMESPACE, Uuid::new_v4(), ext)
}

/// Basename of a storage key; recorded as the asset's `filename`.
pub fn key_filename(storage_key: &str) -> &str {
    storage_key
        .rsplit('/')
        .next()
        .unwrap_or(storage_key)
}

/// Reject keys that could escape the namespace. Generated keys always pass;
/// this guards keys read back from the database or supplied by the seeder.
pub fn validate_key(storage_key: &str) -> Result<(), crate::StorageError> {
    if storage_key.is_empty()
        || storage_key.starts_with('/')
        || storage_key.split('/').any(|part| part == "..")
    {
        return Err(crate::StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_namespaced_and_unique() {
        let a = generate_blob_key("png");
        let b = generate_blob_key("png");
        assert!(a.starts_with("gallery/"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_extension_dot_is_stripped() {
        let key = generate_blob_key(".jpg");
        assert!(key.ends_with(".jpg"));
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_key_filename() {
        assert_eq!(key_filename("gallery/abc.png"), "abc.png");
        assert_eq!(key_filename("abc.png"), "abc.png");
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("gallery/a.png").is_ok());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("gallery/../../etc/passwd").is_err());
        assert!(validate_key("").is_err());
    }
}
