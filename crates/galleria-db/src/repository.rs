use galleria_core::models::{ImageAsset, NewImageAsset, UpdateImageMetadata};
use galleria_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Image asset repository
///
/// Plain CRUD over the `images` table. Rows are immutable except for
/// `title` and `description`; the storage columns are written exactly once
/// at insert, from a blob ref the storage layer produced.
#[derive(Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "images", db.operation = "insert"))]
    pub async fn insert(&self, new: NewImageAsset) -> Result<ImageAsset, AppError> {
        let asset = sqlx::query_as::<Postgres, ImageAsset>(
            "INSERT INTO images (id, title, description, filename, original_name, mime_type, \
             size_bytes, storage_target, storage_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.filename)
        .bind(&new.original_name)
        .bind(&new.mime_type)
        .bind(new.size_bytes)
        .bind(&new.storage_target)
        .bind(&new.storage_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(asset)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ImageAsset>, AppError> {
        let asset = sqlx::query_as::<Postgres, ImageAsset>("SELECT * FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(asset)
    }

    /// List assets newest-first. The `id` tiebreak keeps the order total,
    /// so pages never overlap or skip rows when timestamps collide.
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ImageAsset>, AppError> {
        let assets = sqlx::query_as::<Postgres, ImageAsset>(
            "SELECT * FROM images ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Partial metadata update: absent fields keep their current value, an
    /// explicit null clears the column. Storage columns, mime type, and size
    /// are deliberately not touchable here; they are write-once at insert.
    #[tracing::instrument(skip(self, update), fields(db.table = "images", db.operation = "update", db.record_id = %id))]
    pub async fn update_metadata(
        &self,
        id: Uuid,
        update: &UpdateImageMetadata,
    ) -> Result<Option<ImageAsset>, AppError> {
        let asset = sqlx::query_as::<Postgres, ImageAsset>(
            "UPDATE images SET \
             title = CASE WHEN $2 THEN $3 ELSE title END, \
             description = CASE WHEN $4 THEN $5 ELSE description END, \
             updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.title.is_some())
        .bind(update.title.clone().flatten())
        .bind(update.description.is_some())
        .bind(update.description.clone().flatten())
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    /// Delete the metadata row only. The caller removes the blob first, so
    /// a failed blob delete leaves the row (and the asset) intact.
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_row(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Insert-or-update keyed on the blob location; used by the seeder so
    /// repeated runs refresh the same rows instead of duplicating them.
    pub async fn upsert_by_location(&self, new: NewImageAsset) -> Result<ImageAsset, AppError> {
        let asset = sqlx::query_as::<Postgres, ImageAsset>(
            "INSERT INTO images (id, title, description, filename, original_name, mime_type, \
             size_bytes, storage_target, storage_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (storage_target, storage_path) DO UPDATE SET \
             title = EXCLUDED.title, description = EXCLUDED.description, \
             filename = EXCLUDED.filename, original_name = EXCLUDED.original_name, \
             mime_type = EXCLUDED.mime_type, size_bytes = EXCLUDED.size_bytes, \
             updated_at = now() \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.filename)
        .bind(&new.original_name)
        .bind(&new.mime_type)
        .bind(new.size_bytes)
        .bind(&new.storage_target)
        .bind(&new.storage_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(asset)
    }
}
