//! The physical village: entity storage, placement, interiors, and crafting.
//!
//! This crate owns every edit to the entity list that does not depend on
//! the behavior of living entities. The update pass in `snowglobe-core`
//! and the observer's edit endpoints both go through it.
//!
//! # Modules
//!
//! - [`crafting`] -- Merging clusters of snowflakes and snow into the next tier.
//! - [`error`] -- Error types for placement, removal, and interior edits.
//! - [`geometry`] -- Stepping, wandering, and centroid helpers.
//! - [`interior`] -- The scoped placement surface inside a structure.
//! - [`names`] -- Random names for villagers and animals.
//! - [`placement`] -- Palette drops with caps, removal, and clearing.
//! - [`store`] -- [`EntityStore`], the ordered entity list, and the
//!   reference integrity pass.
//! - [`starting_village`] -- Default hamlet for a fresh engine.

pub mod crafting;
pub mod error;
pub mod geometry;
pub mod interior;
pub mod names;
pub mod placement;
pub mod starting_village;
pub mod store;

// Re-export primary types at crate root.
pub use crafting::{MERGE_GROUP_SIZE, Merge, craft_decorations};
pub use error::WorldError;
pub use interior::{INTERIOR_BOUNDS, InteriorView, enter, place_interior, remove_interior};
pub use placement::{PlacementRules, clear, new_living, palette_item_of, place, random_age, remove};
pub use starting_village::{StartingVillageIds, create_starting_village};
pub use store::{EntityStore, RepairReport};
