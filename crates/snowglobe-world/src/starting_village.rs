//! Default starting village used when the engine boots without a saved one.
//!
//! Lays out a small hamlet on an 800x500 canvas: one of each structure, a
//! lake and a park, a row of trees along the top edge, a family, a dog, and
//! a few snowflakes close enough to become snow on the first tick.

use rand::Rng;
use snowglobe_types::{Bounds, EntityId, PaletteItem, Position};

use crate::error::WorldError;
use crate::placement::{PlacementRules, place};
use crate::store::EntityStore;

/// Ids of the landmark entities in the starting village.
#[derive(Debug, Clone)]
pub struct StartingVillageIds {
    /// The family home.
    pub house: EntityId,
    /// The school.
    pub school: EntityId,
    /// The church.
    pub church: EntityId,
    /// The frozen lake.
    pub lake: EntityId,
    /// The park.
    pub park: EntityId,
    /// The starting family: two adults then a kid.
    pub family: Vec<EntityId>,
}

fn place_one<R: Rng + ?Sized>(
    store: &mut EntityStore,
    item: PaletteItem,
    x: f32,
    y: f32,
    bounds: Bounds,
    rules: &PlacementRules,
    rng: &mut R,
) -> Result<EntityId, WorldError> {
    let ids = place(store, item, Position::new(x, y), bounds, rules, rng)?;
    ids.first().copied().ok_or(WorldError::VillageFull {
        cap: rules.max_entities,
    })
}

/// Build the starting village.
///
/// # Errors
///
/// Returns a [`WorldError`] only if `rules` are too tight to hold the
/// starting layout.
pub fn create_starting_village<R: Rng + ?Sized>(
    bounds: Bounds,
    rules: &PlacementRules,
    rng: &mut R,
) -> Result<(EntityStore, StartingVillageIds), WorldError> {
    let mut store = EntityStore::new();

    let house = place_one(&mut store, PaletteItem::House, 160.0, 300.0, bounds, rules, rng)?;
    let school = place_one(&mut store, PaletteItem::School, 420.0, 220.0, bounds, rules, rng)?;
    let church = place_one(&mut store, PaletteItem::Church, 660.0, 300.0, bounds, rules, rng)?;
    let lake = place_one(&mut store, PaletteItem::Lake, 620.0, 430.0, bounds, rules, rng)?;
    let park = place_one(&mut store, PaletteItem::Park, 300.0, 420.0, bounds, rules, rng)?;

    for x in [80.0, 200.0, 320.0, 540.0, 720.0] {
        place_one(&mut store, PaletteItem::Tree, x, 60.0, bounds, rules, rng)?;
    }
    place_one(&mut store, PaletteItem::Star, 400.0, 30.0, bounds, rules, rng)?;
    place_one(&mut store, PaletteItem::Gift, 200.0, 340.0, bounds, rules, rng)?;
    place_one(&mut store, PaletteItem::Food, 240.0, 360.0, bounds, rules, rng)?;

    for (x, y) in [(480.0, 360.0), (500.0, 370.0), (490.0, 390.0)] {
        place_one(&mut store, PaletteItem::Snowflake, x, y, bounds, rules, rng)?;
    }

    let family = place(
        &mut store,
        PaletteItem::Family,
        Position::new(200.0, 260.0),
        bounds,
        rules,
        rng,
    )?;
    place_one(&mut store, PaletteItem::Dog, 240.0, 280.0, bounds, rules, rng)?;

    Ok((
        store,
        StartingVillageIds {
            house,
            school,
            church,
            lake,
            park,
            family,
        },
    ))
}
