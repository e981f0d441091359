//! Galleria API Library
//!
//! HTTP surface for the gallery: upload, listing, metadata updates, file
//! serving, and deletion, all under the `/images` prefix. Exposed as a
//! library so integration tests can assemble the router against their own
//! database and storage.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
