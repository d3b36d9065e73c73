//! The village archive: snapshot images in the object store, records and
//! entity blobs in the `villages` table.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use snowglobe_types::VillageSnapshot;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, SaveError};
use crate::object_store::FsObjectStore;
use crate::postgres::PostgresPool;
use crate::snapshot::{PreparedSave, decode_snapshot, prepare_save};

/// A saved village as listed in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VillageRecord {
    /// Village id.
    pub id: Uuid,
    /// User-chosen title.
    pub title: String,
    /// Object key of the snapshot image.
    pub storage_path: String,
    /// Simulated year the village started in.
    pub start_year: i64,
    /// Simulated year at the moment of saving.
    pub current_year: i64,
    /// Number of saved entities.
    pub entity_count: i32,
    /// When the village was saved.
    pub created_at: DateTime<Utc>,
}

/// Storage for saved villages.
pub trait VillageArchive: Send + Sync {
    /// Store a validated save: image first, then the record.
    fn store(&self, save: PreparedSave) -> impl Future<Output = Result<VillageRecord, DbError>> + Send;

    /// Every saved village, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<VillageRecord>, DbError>> + Send;

    /// The snapshot saved under `id`.
    fn load(&self, id: Uuid) -> impl Future<Output = Result<VillageSnapshot, DbError>> + Send;

    /// Remove the image, then the record.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Validate and archive a village.
///
/// Validation runs before the archive is consulted, so an empty village
/// never touches storage and is rejected even when `archive` is `None`.
///
/// # Errors
///
/// Returns the validation variants of [`SaveError`],
/// [`SaveError::NoArchive`] for a valid save with no archive, or
/// [`SaveError::Archive`] if storage fails.
pub async fn save_village<A: VillageArchive>(
    archive: Option<&A>,
    snapshot: &VillageSnapshot,
    image: Vec<u8>,
) -> Result<VillageRecord, SaveError> {
    let prepared = prepare_save(snapshot, image)?;
    let archive = archive.ok_or(SaveError::NoArchive)?;
    let record = archive.store(prepared).await?;
    tracing::info!(
        village = %record.id,
        title = %record.title,
        entities = record.entity_count,
        "Village saved"
    );
    Ok(record)
}

/// [`VillageArchive`] backed by `PostgreSQL` and a filesystem object store.
#[derive(Debug, Clone)]
pub struct PgVillageArchive {
    pool: PostgresPool,
    objects: FsObjectStore,
}

impl PgVillageArchive {
    /// Combine a connected pool and an object store.
    pub const fn new(pool: PostgresPool, objects: FsObjectStore) -> Self {
        Self { pool, objects }
    }

    const fn db(&self) -> &PgPool {
        self.pool.pool()
    }

    /// The image stored for a saved village.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] for an unknown id.
    pub async fn image(&self, id: Uuid) -> Result<Vec<u8>, DbError> {
        let path: Option<String> = sqlx::query_scalar("SELECT storage_path FROM villages WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db())
            .await?;
        let path = path.ok_or(DbError::NotFound(id))?;
        self.objects.get(&path).await
    }
}

impl VillageArchive for PgVillageArchive {
    async fn store(&self, save: PreparedSave) -> Result<VillageRecord, DbError> {
        self.objects.put(&save.storage_path, &save.image).await?;

        let inserted = sqlx::query_as::<_, VillageRecord>(
            r"INSERT INTO villages
              (id, title, storage_path, snapshot, start_year, current_year, entity_count)
              VALUES ($1, $2, $3, $4, $5, $6, $7)
              RETURNING id, title, storage_path, start_year, current_year, entity_count, created_at",
        )
        .bind(save.id)
        .bind(&save.title)
        .bind(&save.storage_path)
        .bind(&save.blob)
        .bind(i64::try_from(save.start_year).unwrap_or(i64::MAX))
        .bind(i64::try_from(save.current_year).unwrap_or(i64::MAX))
        .bind(i32::try_from(save.entity_count).unwrap_or(i32::MAX))
        .fetch_one(self.db())
        .await;

        match inserted {
            Ok(record) => Ok(record),
            Err(e) => {
                if let Err(cleanup) = self.objects.delete(&save.storage_path).await {
                    tracing::warn!(error = %cleanup, path = %save.storage_path, "Orphaned snapshot image");
                }
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<VillageRecord>, DbError> {
        let rows = sqlx::query_as::<_, VillageRecord>(
            r"SELECT id, title, storage_path, start_year, current_year, entity_count, created_at
              FROM villages
              ORDER BY created_at DESC",
        )
        .fetch_all(self.db())
        .await?;
        Ok(rows)
    }

    async fn load(&self, id: Uuid) -> Result<VillageSnapshot, DbError> {
        let blob: Option<serde_json::Value> = sqlx::query_scalar("SELECT snapshot FROM villages WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db())
            .await?;
        decode_snapshot(blob.ok_or(DbError::NotFound(id))?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let path: Option<String> = sqlx::query_scalar("SELECT storage_path FROM villages WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db())
            .await?;
        let path = path.ok_or(DbError::NotFound(id))?;

        self.objects.delete(&path).await?;
        sqlx::query("DELETE FROM villages WHERE id = $1")
            .bind(id)
            .execute(self.db())
            .await?;
        tracing::info!(village = %id, "Village deleted");
        Ok(())
    }
}
