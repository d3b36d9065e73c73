//! Save validation and the snapshot blob.
//!
//! Everything here is synchronous and performs no I/O. A save that fails
//! validation never reaches the archive.

use snowglobe_types::VillageSnapshot;
use uuid::Uuid;

use crate::error::{DbError, SaveError};

/// A validated save, ready for the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSave {
    /// Id the saved village will be stored under.
    pub id: Uuid,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Object key for the snapshot image.
    pub storage_path: String,
    /// The entity list and years as an opaque JSON blob.
    pub blob: serde_json::Value,
    /// Simulated year the village started in.
    pub start_year: u64,
    /// Simulated year at the moment of saving.
    pub current_year: u64,
    /// Number of entities in the snapshot.
    pub entity_count: usize,
    /// PNG bytes of the rendered village.
    pub image: Vec<u8>,
}

/// Validate a save request and encode the snapshot.
///
/// Checks run in order: empty village, blank title, missing image.
///
/// # Errors
///
/// Returns [`SaveError::EmptyVillage`], [`SaveError::EmptyTitle`], or
/// [`SaveError::EmptyImage`]. Encoding failures surface as
/// [`SaveError::Archive`].
pub fn prepare_save(snapshot: &VillageSnapshot, image: Vec<u8>) -> Result<PreparedSave, SaveError> {
    if snapshot.entities.is_empty() {
        return Err(SaveError::EmptyVillage);
    }
    let title = snapshot.title.trim();
    if title.is_empty() {
        return Err(SaveError::EmptyTitle);
    }
    if image.is_empty() {
        return Err(SaveError::EmptyImage);
    }

    let id = Uuid::now_v7();
    let mut trimmed = snapshot.clone();
    title.clone_into(&mut trimmed.title);
    let blob = serde_json::to_value(&trimmed).map_err(DbError::from)?;

    Ok(PreparedSave {
        id,
        title: trimmed.title,
        storage_path: format!("villages/{id}.png"),
        blob,
        start_year: snapshot.start_year,
        current_year: snapshot.current_year,
        entity_count: snapshot.entities.len(),
        image,
    })
}

/// Decode a stored blob back into a snapshot.
///
/// # Errors
///
/// Returns [`DbError::Serialization`] if the blob is not a snapshot.
pub fn decode_snapshot(blob: serde_json::Value) -> Result<VillageSnapshot, DbError> {
    Ok(serde_json::from_value(blob)?)
}
