//! Seed the database and storage with sample gallery images.
//!
//! Run from the workspace root: `cargo run -p galleria-api --bin seed`.
//! Safe to run repeatedly.

use galleria_core::Config;
use galleria_db::{seed::seed_sample_images, ImageRepository};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    galleria_api::setup::telemetry::init_tracing();

    let config = Config::from_env()?;
    config.validate()?;

    let pool = galleria_api::setup::database::setup_database(&config).await?;
    let storage = galleria_api::setup::storage::setup_storage(&config).await?;

    let repo = ImageRepository::new(pool);
    seed_sample_images(&repo, &storage).await?;

    tracing::info!("Seeding complete");
    Ok(())
}
