//! Village snapshot archive for the Snowglobe village.
//!
//! A save pairs a rendered PNG with the serialized entity list. The image
//! goes to an object store and the record, with the entity blob, goes to
//! `PostgreSQL`.
//!
//! ```text
//! prepare_save (validation, no I/O)
//!     |
//!     +-- FsObjectStore   villages/<id>.png
//!     +-- PostgreSQL      villages row (title, years, snapshot JSONB)
//! ```
//!
//! # Modules
//!
//! - [`archive`] -- [`VillageArchive`] trait and the `PostgreSQL` implementation
//! - [`error`] -- Storage and save validation errors
//! - [`object_store`] -- Filesystem blob storage for images
//! - [`postgres`] -- Connection pool and migrations
//! - [`snapshot`] -- Save validation and blob encoding

pub mod archive;
pub mod error;
pub mod object_store;
pub mod postgres;
pub mod snapshot;

// Re-export primary types for convenience.
pub use archive::{PgVillageArchive, VillageArchive, VillageRecord, save_village};
pub use error::{DbError, SaveError};
pub use object_store::FsObjectStore;
pub use postgres::PostgresPool;
pub use snapshot::{PreparedSave, decode_snapshot, prepare_save};
