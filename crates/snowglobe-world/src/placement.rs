//! Placing items from the palette and removing entities by id.
//!
//! Placement seeds kind-appropriate defaults and enforces caps before the
//! store is touched: a rejected placement leaves the village unchanged.
//! Removal is always followed by a reference integrity pass.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use snowglobe_types::{
    Bounds, DecorationKind, EntityBody, EntityId, FamilyId, LifeStage, Living, PaletteItem,
    PickupKind, Position, Species, StructureKind, VillageEntity,
};
use tracing::{debug, info};

use crate::error::WorldError;
use crate::geometry::offset;
use crate::names::{random_gender, random_name};
use crate::store::EntityStore;

/// Caps and surface sizes enforced when editing the village.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    /// Per-item caps. Items without an entry are only bound by the totals.
    #[serde(default = "default_kind_caps")]
    pub kind_caps: BTreeMap<PaletteItem, usize>,
    /// Maximum number of entities of any kind.
    #[serde(default = "default_max_entities")]
    pub max_entities: usize,
    /// Maximum number of people and animals.
    #[serde(default = "default_max_living")]
    pub max_living: usize,
    /// Maximum number of items inside a single structure.
    #[serde(default = "default_max_interior_items")]
    pub max_interior_items: usize,
    /// Starting quantity for food, water, and toy pickups.
    #[serde(default = "default_pickup_quantity")]
    pub pickup_quantity: u32,
}

fn default_kind_caps() -> BTreeMap<PaletteItem, usize> {
    BTreeMap::from([(PaletteItem::Tree, 10)])
}

const fn default_max_entities() -> usize {
    200
}

const fn default_max_living() -> usize {
    60
}

const fn default_max_interior_items() -> usize {
    30
}

const fn default_pickup_quantity() -> u32 {
    1
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            kind_caps: default_kind_caps(),
            max_entities: default_max_entities(),
            max_living: default_max_living(),
            max_interior_items: default_max_interior_items(),
            pickup_quantity: default_pickup_quantity(),
        }
    }
}

/// Which palette entry an existing entity counts against for caps.
///
/// Every person counts as [`PaletteItem::Person`] whatever their stage;
/// wood, snow, and snowmen are never placed directly and count as nothing.
pub const fn palette_item_of(entity: &VillageEntity) -> Option<PaletteItem> {
    match &entity.body {
        EntityBody::Structure(s) => Some(match s.kind {
            StructureKind::House => PaletteItem::House,
            StructureKind::School => PaletteItem::School,
            StructureKind::Church => PaletteItem::Church,
        }),
        EntityBody::Decoration(d) => match d.kind {
            DecorationKind::Tree => Some(PaletteItem::Tree),
            DecorationKind::Star => Some(PaletteItem::Star),
            DecorationKind::Snowflake => Some(PaletteItem::Snowflake),
            DecorationKind::Gift => Some(PaletteItem::Gift),
            DecorationKind::Lake => Some(PaletteItem::Lake),
            DecorationKind::Park => Some(PaletteItem::Park),
            DecorationKind::Snow | DecorationKind::Snowman => None,
        },
        EntityBody::Pickup(p) => match p.kind {
            PickupKind::Food => Some(PaletteItem::Food),
            PickupKind::Water => Some(PaletteItem::Water),
            PickupKind::Toy => Some(PaletteItem::Toy),
            PickupKind::Wood => None,
        },
        EntityBody::Living(l) => Some(match l.species {
            Species::Person => PaletteItem::Person,
            Species::Dog => PaletteItem::Dog,
            Species::Cat => PaletteItem::Cat,
            Species::Bird => PaletteItem::Bird,
            Species::Rabbit => PaletteItem::Rabbit,
            Species::Squirrel => PaletteItem::Squirrel,
        }),
    }
}

/// The palette entry whose cap applies when placing `item`.
const fn cap_key(item: PaletteItem) -> PaletteItem {
    match item {
        PaletteItem::Family | PaletteItem::Baby => PaletteItem::Person,
        other => other,
    }
}

/// Draw a random age consistent with a life stage.
pub fn random_age<R: Rng + ?Sized>(species: Species, stage: LifeStage, rng: &mut R) -> u32 {
    if species.is_animal() {
        return match stage {
            LifeStage::Baby => 0,
            _ => rng.random_range(1..=5),
        };
    }
    match stage {
        LifeStage::Baby => rng.random_range(0..=2),
        LifeStage::Kid => rng.random_range(3..=12),
        LifeStage::Teenager => rng.random_range(13..=17),
        LifeStage::Adult => rng.random_range(18..=50),
    }
}

/// Create a living entity with random name, gender, and stage-consistent age.
pub fn new_living<R: Rng + ?Sized>(species: Species, stage: LifeStage, rng: &mut R) -> Living {
    let gender = random_gender(rng);
    let name = random_name(species, gender, rng);
    let age = random_age(species, stage, rng);
    Living::new(name, species, gender, stage, age)
}

/// Build the entities a palette drop produces, without touching any store.
fn build<R: Rng + ?Sized>(
    item: PaletteItem,
    at: Position,
    bounds: Bounds,
    rules: &PlacementRules,
    rng: &mut R,
) -> Vec<VillageEntity> {
    let at = bounds.clamp(at);
    let single = |body| vec![VillageEntity::new(at, body)];
    match item {
        PaletteItem::House => vec![VillageEntity::structure(StructureKind::House, at)],
        PaletteItem::School => vec![VillageEntity::structure(StructureKind::School, at)],
        PaletteItem::Church => vec![VillageEntity::structure(StructureKind::Church, at)],
        PaletteItem::Tree => vec![VillageEntity::decoration(DecorationKind::Tree, at)],
        PaletteItem::Star => vec![VillageEntity::decoration(DecorationKind::Star, at)],
        PaletteItem::Snowflake => vec![VillageEntity::decoration(DecorationKind::Snowflake, at)],
        PaletteItem::Gift => vec![VillageEntity::decoration(DecorationKind::Gift, at)],
        PaletteItem::Lake => vec![VillageEntity::decoration(DecorationKind::Lake, at)],
        PaletteItem::Park => vec![VillageEntity::decoration(DecorationKind::Park, at)],
        PaletteItem::Food => vec![VillageEntity::pickup(PickupKind::Food, rules.pickup_quantity, at)],
        PaletteItem::Water => vec![VillageEntity::pickup(PickupKind::Water, rules.pickup_quantity, at)],
        PaletteItem::Toy => vec![VillageEntity::pickup(PickupKind::Toy, rules.pickup_quantity, at)],
        PaletteItem::Person => single(EntityBody::Living(new_living(
            Species::Person,
            LifeStage::Adult,
            rng,
        ))),
        PaletteItem::Baby => single(EntityBody::Living(new_living(
            Species::Person,
            LifeStage::Baby,
            rng,
        ))),
        PaletteItem::Dog => single(EntityBody::Living(new_living(Species::Dog, LifeStage::Adult, rng))),
        PaletteItem::Cat => single(EntityBody::Living(new_living(Species::Cat, LifeStage::Adult, rng))),
        PaletteItem::Bird => single(EntityBody::Living(new_living(Species::Bird, LifeStage::Adult, rng))),
        PaletteItem::Rabbit => single(EntityBody::Living(new_living(
            Species::Rabbit,
            LifeStage::Adult,
            rng,
        ))),
        PaletteItem::Squirrel => single(EntityBody::Living(new_living(
            Species::Squirrel,
            LifeStage::Adult,
            rng,
        ))),
        PaletteItem::Family => build_family(at, bounds, rng),
    }
}

/// A married couple and one kid sharing a fresh family id.
fn build_family<R: Rng + ?Sized>(at: Position, bounds: Bounds, rng: &mut R) -> Vec<VillageEntity> {
    let family = FamilyId::new();
    let mut first = new_living(Species::Person, LifeStage::Adult, rng);
    let mut second = new_living(Species::Person, LifeStage::Adult, rng);
    second.gender = first.gender.opposite();
    second.name = random_name(Species::Person, second.gender, rng);
    let mut kid = new_living(Species::Person, LifeStage::Kid, rng);

    first.family = Some(family);
    second.family = Some(family);
    kid.family = Some(family);

    let mut first = VillageEntity::living(first, bounds.clamp(offset(at, -15.0, 0.0)));
    let mut second = VillageEntity::living(second, bounds.clamp(offset(at, 15.0, 0.0)));
    let kid = VillageEntity::living(kid, bounds.clamp(offset(at, 0.0, 20.0)));

    let (first_id, second_id) = (first.id, second.id);
    if let Some(l) = first.as_living_mut() {
        l.spouse = Some(second_id);
    }
    if let Some(l) = second.as_living_mut() {
        l.spouse = Some(first_id);
    }
    vec![first, second, kid]
}

/// Place a palette item at a drop coordinate.
///
/// Returns the ids of every entity created (three for a family). The drop
/// coordinate is clamped into `bounds`.
///
/// # Errors
///
/// - [`WorldError::CapReached`] if the item's per-kind cap is full.
/// - [`WorldError::VillageFull`] if the total entity cap would be exceeded.
/// - [`WorldError::TooManyResidents`] if the living cap would be exceeded.
///
/// The store is unchanged on error.
pub fn place<R: Rng + ?Sized>(
    store: &mut EntityStore,
    item: PaletteItem,
    at: Position,
    bounds: Bounds,
    rules: &PlacementRules,
    rng: &mut R,
) -> Result<Vec<EntityId>, WorldError> {
    let key = cap_key(item);
    let entities = build(item, at, bounds, rules, rng);
    if let Some(&cap) = rules.kind_caps.get(&key) {
        let existing = store.count_where(|e| palette_item_of(e) == Some(key));
        let produced = entities
            .iter()
            .filter(|e| palette_item_of(e) == Some(key))
            .count();
        if existing.saturating_add(produced) > cap {
            debug!(item = ?item, cap, existing, produced, "placement rejected by kind cap");
            return Err(WorldError::CapReached { item: key, cap });
        }
    }

    let new_total = store.len().saturating_add(entities.len());
    if new_total > rules.max_entities {
        return Err(WorldError::VillageFull {
            cap: rules.max_entities,
        });
    }
    let new_living = entities.iter().filter(|e| e.is_living()).count();
    if new_living > 0 && store.living_count().saturating_add(new_living) > rules.max_living {
        return Err(WorldError::TooManyResidents {
            cap: rules.max_living,
        });
    }

    let ids: Vec<EntityId> = entities.iter().map(|e| e.id).collect();
    for entity in entities {
        store.push(entity);
    }
    info!(item = item.label(), count = ids.len(), total = store.len(), "item placed");
    Ok(ids)
}

/// Remove an entity by id and repair references to it.
///
/// Occupants of a removed structure end up outside; the partner of a
/// removed spouse keeps the family id but is no longer married.
///
/// # Errors
///
/// Returns [`WorldError::EntityNotFound`] if no entity has this id.
pub fn remove(store: &mut EntityStore, id: EntityId) -> Result<VillageEntity, WorldError> {
    let removed = store.take(id).ok_or(WorldError::EntityNotFound(id))?;
    let report = store.repair_references();
    info!(
        entity = %id,
        evicted = report.evicted,
        widowed = report.widowed,
        "entity removed"
    );
    Ok(removed)
}

/// Remove every entity from the village.
pub fn clear(store: &mut EntityStore) {
    let count = store.len();
    store.clear();
    info!(count, "village cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use snowglobe_types::Whereabouts;

    use super::*;

    const BOUNDS: Bounds = Bounds::new(800.0, 500.0);

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn eleventh_tree_is_rejected() {
        let mut store = EntityStore::new();
        let rules = PlacementRules::default();
        let mut rng = rng();
        for i in 0..10_u8 {
            let at = Position::new(f32::from(i) * 20.0, 100.0);
            place(&mut store, PaletteItem::Tree, at, BOUNDS, &rules, &mut rng).unwrap();
        }
        assert_eq!(store.len(), 10);

        let err = place(
            &mut store,
            PaletteItem::Tree,
            Position::new(400.0, 100.0),
            BOUNDS,
            &rules,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, WorldError::CapReached { cap: 10, .. }));
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn family_counts_every_member_against_the_person_cap() {
        let mut store = EntityStore::new();
        let rules = PlacementRules {
            kind_caps: BTreeMap::from([(PaletteItem::Person, 10)]),
            ..PlacementRules::default()
        };
        let mut rng = rng();
        for _ in 0..9 {
            place(&mut store, PaletteItem::Person, Position::new(50.0, 50.0), BOUNDS, &rules, &mut rng)
                .unwrap();
        }

        let err = place(
            &mut store,
            PaletteItem::Family,
            Position::new(200.0, 200.0),
            BOUNDS,
            &rules,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, WorldError::CapReached { item: PaletteItem::Person, cap: 10 }));
        assert_eq!(store.len(), 9);

        place(&mut store, PaletteItem::Baby, Position::new(60.0, 60.0), BOUNDS, &rules, &mut rng)
            .unwrap();
        assert_eq!(store.living_count(), 10);
    }

    #[test]
    fn living_placement_seeds_defaults() {
        let mut store = EntityStore::new();
        let mut rng = rng();
        let ids = place(
            &mut store,
            PaletteItem::Baby,
            Position::new(10.0, 10.0),
            BOUNDS,
            &PlacementRules::default(),
            &mut rng,
        )
        .unwrap();
        let baby = store.get(ids[0]).unwrap().as_living().unwrap();
        assert_eq!(baby.stage, LifeStage::Baby);
        assert!(baby.age_years <= 2);
        assert_eq!(baby.hunger, 100);
        assert_eq!(baby.thirst, 100);
        assert!(!baby.name.is_empty());
    }

    #[test]
    fn drop_coordinate_is_clamped() {
        let mut store = EntityStore::new();
        let ids = place(
            &mut store,
            PaletteItem::Star,
            Position::new(-50.0, 9000.0),
            BOUNDS,
            &PlacementRules::default(),
            &mut rng(),
        )
        .unwrap();
        let star = store.get(ids[0]).unwrap();
        assert!(BOUNDS.contains(star.position));
    }

    #[test]
    fn family_is_a_married_couple_with_a_kid() {
        let mut store = EntityStore::new();
        let ids = place(
            &mut store,
            PaletteItem::Family,
            Position::new(200.0, 200.0),
            BOUNDS,
            &PlacementRules::default(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(ids.len(), 3);

        let members: Vec<&Living> = ids
            .iter()
            .map(|id| store.get(*id).unwrap().as_living().unwrap())
            .collect();
        let family = members[0].family;
        assert!(family.is_some());
        assert!(members.iter().all(|m| m.family == family));
        assert_eq!(members[0].spouse, Some(ids[1]));
        assert_eq!(members[1].spouse, Some(ids[0]));
        assert_ne!(members[0].gender, members[1].gender);
        assert_eq!(members[2].stage, LifeStage::Kid);
        assert!((3..=12).contains(&members[2].age_years));
    }

    #[test]
    fn living_cap_rejects_without_change() {
        let mut store = EntityStore::new();
        let rules = PlacementRules {
            max_living: 2,
            ..PlacementRules::default()
        };
        let mut rng = rng();
        let err = place(
            &mut store,
            PaletteItem::Family,
            Position::new(0.0, 0.0),
            BOUNDS,
            &rules,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, WorldError::TooManyResidents { cap: 2 }));
        assert!(store.is_empty());
    }

    #[test]
    fn total_cap_rejects() {
        let mut store = EntityStore::new();
        let rules = PlacementRules {
            max_entities: 1,
            ..PlacementRules::default()
        };
        let mut rng = rng();
        place(&mut store, PaletteItem::Star, Position::new(0.0, 0.0), BOUNDS, &rules, &mut rng)
            .unwrap();
        let err = place(&mut store, PaletteItem::Star, Position::new(0.0, 0.0), BOUNDS, &rules, &mut rng)
            .unwrap_err();
        assert!(matches!(err, WorldError::VillageFull { cap: 1 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removing_a_house_evicts_its_occupants() {
        let mut store = EntityStore::new();
        let mut rng = rng();
        let rules = PlacementRules::default();
        let house = place(&mut store, PaletteItem::House, Position::new(0.0, 0.0), BOUNDS, &rules, &mut rng)
            .unwrap()[0];
        let person = place(&mut store, PaletteItem::Person, Position::new(0.0, 0.0), BOUNDS, &rules, &mut rng)
            .unwrap()[0];
        if let Some(l) = store.get_mut(person).and_then(VillageEntity::as_living_mut) {
            l.whereabouts = Whereabouts::Home(house);
        }

        let removed = remove(&mut store, house).unwrap();
        assert_eq!(removed.id, house);
        let l = store.get(person).unwrap().as_living().unwrap();
        assert_eq!(l.whereabouts, Whereabouts::Outside);
    }

    #[test]
    fn removing_unknown_id_fails() {
        let mut store = EntityStore::new();
        let err = remove(&mut store, EntityId::new()).unwrap_err();
        assert!(matches!(err, WorldError::EntityNotFound(_)));
    }

    #[test]
    fn clear_empties_the_village() {
        let mut store = EntityStore::new();
        let mut rng = rng();
        let rules = PlacementRules::default();
        place(&mut store, PaletteItem::Family, Position::new(50.0, 50.0), BOUNDS, &rules, &mut rng)
            .unwrap();
        clear(&mut store);
        assert!(store.is_empty());
    }
}
