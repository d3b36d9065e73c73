//! The serialized form of a saved village.
//!
//! A snapshot is the entity list plus the simulated years it spans. It is
//! stored as an opaque JSON blob next to a rendered image and can be
//! restored into a live village.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::structs::VillageEntity;

/// A one-shot copy of a village at a point in simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VillageSnapshot {
    /// User-chosen title.
    pub title: String,
    /// Simulated year the village started in.
    pub start_year: u64,
    /// Simulated year at the moment of saving.
    pub current_year: u64,
    /// Every entity, in list order.
    pub entities: Vec<VillageEntity>,
}

impl VillageSnapshot {
    /// Simulated years elapsed between start and save.
    pub const fn years_elapsed(&self) -> u64 {
        self.current_year.saturating_sub(self.start_year)
    }
}
