//! Galleria DB Library
//!
//! Metadata persistence for gallery assets: the `ImageRepository` over a
//! Postgres pool, plus the sample-data seeder. Blob I/O never happens here;
//! the catalog layer in `galleria-api` sequences storage and repository
//! calls.

pub mod repository;
pub mod seed;

pub use repository::ImageRepository;
