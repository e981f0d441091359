//! Sample gallery data for local development.
//!
//! Writes three tiny 1x1 images through the storage router and upserts the
//! matching rows keyed on blob location, so running the seeder twice leaves
//! the same three assets in place.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use galleria_core::models::NewImageAsset;
use galleria_core::AppError;
use galleria_storage::StorageRouter;

use crate::ImageRepository;

struct SampleImage {
    filename: &'static str,
    title: &'static str,
    description: &'static str,
    mime: &'static str,
    // 1x1 pixel payload, inlined so seeding needs no network access
    payload_base64: &'static str,
}

const PIXEL_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8/x8AAwMB/awJb2cAAAAASUVORK5CYII=";

const PIXEL_JPEG: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDABAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBD/wAALCAABAAEBAREA/8QAHwAAAQUBAQEBAQEAAAAAAAAAAAECAwQFBgcICQoL/8QAtRAAAgEDAwIEAwUFBAQAAAF9AQIDAAQRBRIhMUEGE1FhByJxFDKBkaEII0KxwRVS0fAkM2JyggkKFhcYGRolJicoKSo0NTY3ODk6Q0RFRkdISUpTVFVWV1hZWmNkZWZnaGlqc3R1dnd4eXqDhIWGh4iJipKTlJWWl5iZmqKjpKWmp6ipqrKztLW2t7i5usLDxMXGx8jJytLT1NXW19jZ2uHi4+Tl5ufo6erx8vP09fb3+Pn6/9oACAEBAAA/ACv/2Q==";

const PIXEL_GIF: &str = "R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

const SAMPLES: &[SampleImage] = &[
    SampleImage {
        filename: "sample1.png",
        title: "Sample One",
        description: "Seeded image 1",
        mime: "image/png",
        payload_base64: PIXEL_PNG,
    },
    SampleImage {
        filename: "sample2.jpg",
        title: "Sample Two",
        description: "Seeded image 2",
        mime: "image/jpeg",
        payload_base64: PIXEL_JPEG,
    },
    SampleImage {
        filename: "sample3.gif",
        title: "Sample Three",
        description: "Seeded image 3",
        mime: "image/gif",
        payload_base64: PIXEL_GIF,
    },
];

/// Seed the sample assets. Idempotent: existing blobs are left untouched
/// and rows are upserted by (storage_target, storage_path).
pub async fn seed_sample_images(
    repo: &ImageRepository,
    storage: &StorageRouter,
) -> Result<(), AppError> {
    let backend = storage.default_backend();
    let target = storage.default_target().to_string();

    for sample in SAMPLES {
        let key = format!("{}/{}", galleria_core::constants::GALLERY_NAMESPACE, sample.filename);

        let payload = BASE64
            .decode(sample.payload_base64)
            .map_err(|e| AppError::Internal(format!("invalid seed payload: {e}")))?;
        let size_bytes = payload.len() as i64;

        let present = backend
            .exists(&key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if !present {
            backend
                .put_with_key(&key, payload)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }

        let asset = repo
            .upsert_by_location(NewImageAsset {
                title: Some(sample.title.to_string()),
                description: Some(sample.description.to_string()),
                filename: sample.filename.to_string(),
                original_name: Some(sample.filename.to_string()),
                mime_type: sample.mime.to_string(),
                size_bytes,
                storage_target: target.clone(),
                storage_path: key,
            })
            .await?;

        tracing::info!(
            image_id = %asset.id,
            filename = %asset.filename,
            size_bytes = asset.size_bytes,
            "seeded sample image"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_payloads_decode_to_their_formats() {
        for sample in SAMPLES {
            let bytes = BASE64.decode(sample.payload_base64).unwrap();
            let format = image::guess_format(&bytes).unwrap();
            assert_eq!(format.to_mime_type(), sample.mime, "{}", sample.filename);
        }
    }
}
