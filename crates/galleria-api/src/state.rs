//! Application state shared across handlers.

use galleria_core::Config;
use galleria_db::ImageRepository;
use galleria_storage::StorageRouter;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub images: ImageRepository,
    pub storage: Arc<StorageRouter>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, storage: Arc<StorageRouter>) -> Self {
        let images = ImageRepository::new(pool.clone());
        AppState {
            config,
            pool,
            images,
            storage,
        }
    }
}
