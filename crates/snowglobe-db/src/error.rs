//! Error types for the village archive.
//!
//! Storage failures are reported through [`DbError`]. Save validation
//! failures are reported through [`SaveError`], whose `Display` text is the
//! notice shown to the user.

use uuid::Uuid;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Reading or writing the object store failed.
    #[error("object store error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No saved village has this id.
    #[error("village not found: {0}")]
    NotFound(Uuid),

    /// An object key would escape the store root.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that can occur when saving a village.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// There is nothing to save.
    #[error("Add something to your village before saving!")]
    EmptyVillage,

    /// The title is blank.
    #[error("Please give your village a title!")]
    EmptyTitle,

    /// No snapshot image was supplied.
    #[error("A snapshot image is required to save a village.")]
    EmptyImage,

    /// Validation passed but no archive is configured.
    #[error("village archive is not available")]
    NoArchive,

    /// Validation passed but the archive failed.
    #[error("Failed to save village: {0}")]
    Archive(#[from] DbError),
}
