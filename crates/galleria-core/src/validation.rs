//! Upload validation.
//!
//! Acceptance is decided from the bytes themselves: a payload counts as an
//! image only if its magic bytes parse as a known format. The client's
//! claimed content type and filename extension are recorded on the asset but
//! never trusted for acceptance.

use image::ImageFormat;

use crate::constants::{MAX_TITLE_LENGTH, MAX_UPLOAD_SIZE_BYTES};

/// Validation errors for gallery uploads
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("image file field is required")]
    MissingFile,

    #[error("file is empty")]
    EmptyFile,

    #[error("file too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("file content is not a recognized image format")]
    NotAnImage,

    #[error("title too long: {len} characters (max: {max})")]
    TitleTooLong { len: usize, max: usize },
}

impl ValidationError {
    /// Form field the error refers to, for field-level error responses.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TitleTooLong { .. } => "title",
            _ => "image",
        }
    }
}

/// Gallery upload validator
///
/// Validates payload size and image-ness without coupling to storage or
/// HTTP details.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate the raw upload payload and return the sniffed format.
    ///
    /// A payload of exactly `max_file_size` bytes is accepted; one byte more
    /// is rejected.
    pub fn validate_image_bytes(&self, data: &[u8]) -> Result<ImageFormat, ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::EmptyFile);
        }

        if data.len() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: data.len(),
                max: self.max_file_size,
            });
        }

        image::guess_format(data).map_err(|_| ValidationError::NotAnImage)
    }

    /// Validate an optional title against the length cap.
    pub fn validate_title(&self, title: &str) -> Result<(), ValidationError> {
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::TitleTooLong {
                len,
                max: MAX_TITLE_LENGTH,
            });
        }
        Ok(())
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_SIZE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// PNG signature padded with zeros to an exact byte length. Format
    /// sniffing only reads the magic bytes, so this passes as PNG content.
    fn png_padded_to(len: usize) -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.resize(len, 0);
        data
    }

    #[test]
    fn test_empty_file_rejected() {
        let validator = UploadValidator::default();
        assert!(matches!(
            validator.validate_image_bytes(&[]),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_non_image_rejected() {
        let validator = UploadValidator::default();
        let result = validator.validate_image_bytes(b"just some text, not an image");
        assert!(matches!(result, Err(ValidationError::NotAnImage)));
    }

    #[test]
    fn test_png_accepted_with_format() {
        let validator = UploadValidator::default();
        let format = validator.validate_image_bytes(&png_padded_to(64)).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_gif_accepted() {
        let validator = UploadValidator::default();
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let format = validator.validate_image_bytes(gif).unwrap();
        assert_eq!(format, ImageFormat::Gif);
    }

    #[test]
    fn test_size_boundary() {
        let validator = UploadValidator::default();

        // Exactly at the cap: accepted.
        let at_limit = png_padded_to(MAX_UPLOAD_SIZE_BYTES);
        assert!(validator.validate_image_bytes(&at_limit).is_ok());

        // One byte over: rejected, and size checking runs before sniffing.
        let over_limit = png_padded_to(MAX_UPLOAD_SIZE_BYTES + 1);
        assert!(matches!(
            validator.validate_image_bytes(&over_limit),
            Err(ValidationError::FileTooLarge {
                size,
                max: MAX_UPLOAD_SIZE_BYTES
            }) if size == MAX_UPLOAD_SIZE_BYTES + 1
        ));
    }

    #[test]
    fn test_oversized_non_image_still_too_large() {
        let validator = UploadValidator::new(16);
        let data = vec![0u8; 17];
        assert!(matches!(
            validator.validate_image_bytes(&data),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_title_length_boundary() {
        let validator = UploadValidator::default();
        assert!(validator.validate_title(&"a".repeat(255)).is_ok());
        assert!(matches!(
            validator.validate_title(&"a".repeat(256)),
            Err(ValidationError::TitleTooLong { len: 256, max: 255 })
        ));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::EmptyFile.field(), "image");
        assert_eq!(ValidationError::NotAnImage.field(), "image");
        assert_eq!(
            ValidationError::TitleTooLong { len: 300, max: 255 }.field(),
            "title"
        );
    }
}
