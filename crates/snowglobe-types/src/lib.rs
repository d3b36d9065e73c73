//! Shared type definitions for the Snowglobe village simulation.
//!
//! This crate is the single source of truth for the entity model used
//! across the workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the village front end.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity, family, and village ids
//! - [`enums`] -- Kind tags, life stages, emotions, and placement palettes
//! - [`events`] -- Per-tick village events and causes of death
//! - [`snapshot`] -- The serialized form of a saved village
//! - [`structs`] -- The `VillageEntity` tagged union and its payloads
//! - [`view`] -- Render payloads (sprites, frames) for the front end

pub mod enums;
pub mod events;
pub mod ids;
pub mod snapshot;
pub mod structs;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use enums::{
    DecorationKind, Emotion, Gender, InteriorKind, LifeStage, PaletteItem, PickupKind, Species,
    StructureKind,
};
pub use events::{DeathCause, VillageEvent};
pub use ids::{EntityId, FamilyId, InteriorItemId, VillageId};
pub use snapshot::VillageSnapshot;
pub use structs::{
    Bounds, Carried, Decoration, EntityBody, InteriorItem, Living, METER_MAX, Pickup, Position,
    Structure, VillageEntity, Whereabouts,
};
pub use view::{InteriorFrame, RenderFrame, SoundCue, Sprite};
