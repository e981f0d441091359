//! Domain models

pub mod image;

pub use image::{ImageAsset, ImageAssetResponse, NewImageAsset, Page, UpdateImageMetadata};
