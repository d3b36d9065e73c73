//! Pair events: breeding and marriage.
//!
//! Both passes scan every pair of living entities in list order. A shared
//! [`PairLock`] ensures an entity takes part in at most one pair event per
//! tick across both passes. Marriage links both partners in a single step,
//! so a marriage is never one-sided.

use std::collections::BTreeSet;

use rand::Rng;
use snowglobe_types::{
    EntityBody, EntityId, FamilyId, Gender, LifeStage, Living, Position, Species, VillageEntity,
    VillageEvent,
};
use snowglobe_world::{EntityStore, new_living};
use tracing::info;

use crate::context::{TickContext, roll};

/// Entities already paired this tick.
#[derive(Debug, Clone, Default)]
pub struct PairLock {
    locked: BTreeSet<EntityId>,
}

impl PairLock {
    /// Create an empty lock for a new tick.
    pub const fn new() -> Self {
        Self {
            locked: BTreeSet::new(),
        }
    }

    /// Whether either entity is already paired this tick.
    pub fn either_locked(&self, a: EntityId, b: EntityId) -> bool {
        self.locked.contains(&a) || self.locked.contains(&b)
    }

    /// Mark both entities as paired.
    pub fn lock(&mut self, a: EntityId, b: EntityId) {
        self.locked.insert(a);
        self.locked.insert(b);
    }

    /// Whether an entity is paired this tick.
    pub fn is_locked(&self, id: EntityId) -> bool {
        self.locked.contains(&id)
    }
}

/// Snapshot of the fields the pair passes need.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: EntityId,
    position: Position,
    species: Species,
    gender: Gender,
    stage: LifeStage,
    married: bool,
    family: Option<FamilyId>,
}

fn candidates(store: &EntityStore) -> Vec<Candidate> {
    store
        .iter()
        .filter_map(|e| {
            e.as_living().map(|l| Candidate {
                id: e.id,
                position: e.position,
                species: l.species,
                gender: l.gender,
                stage: l.stage,
                married: l.is_married(),
                family: l.family,
            })
        })
        .collect()
}

/// Every unordered pair `(i, j)` with `i < j`, in list order.
fn pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i.saturating_add(1)..len).map(move |j| (i, j)))
}

/// Same-species, opposite-gender adults within breeding distance may have
/// a baby at their midpoint.
///
/// The baby inherits the first parent's family id, falling back to the
/// second's. No births happen once the living cap is reached.
pub fn breeding_pass<R: Rng + ?Sized>(
    store: &mut EntityStore,
    lock: &mut PairLock,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Vec<VillageEvent> {
    let config = ctx.config;
    let people = candidates(store);
    let mut living_count = store.living_count();
    let mut events = Vec::new();

    for (i, j) in pairs(people.len()) {
        let (Some(a), Some(b)) = (people.get(i), people.get(j)) else {
            continue;
        };
        if living_count >= ctx.max_living {
            break;
        }
        if a.species != b.species
            || a.gender == b.gender
            || a.stage != LifeStage::Adult
            || b.stage != LifeStage::Adult
            || lock.either_locked(a.id, b.id)
            || a.position.distance_to(b.position) > config.breed_distance
        {
            continue;
        }
        if !roll(rng, config.breed_chance) {
            continue;
        }

        let mut baby: Living = new_living(a.species, LifeStage::Baby, rng);
        baby.age_years = 0;
        baby.family = a.family.or(b.family);
        let at = ctx.bounds.clamp(a.position.midpoint(b.position));
        let entity = VillageEntity::living(baby, at);
        let baby_id = entity.id;
        let name = entity.as_living().map(|l| l.name.clone()).unwrap_or_default();

        store.push(entity);
        lock.lock(a.id, b.id);
        living_count = living_count.saturating_add(1);
        info!(baby = %baby_id, species = ?a.species, "baby born");
        events.push(VillageEvent::Born {
            id: baby_id,
            name,
            species: a.species,
        });
    }
    events
}

/// Opposite-gender unmarried adult people within marriage distance may
/// marry, sharing a fresh family id and linking each other as spouse.
pub fn marriage_pass<R: Rng + ?Sized>(
    store: &mut EntityStore,
    lock: &mut PairLock,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Vec<VillageEvent> {
    let config = ctx.config;
    let mut people = candidates(store);
    let mut events = Vec::new();

    for (i, j) in pairs(people.len()) {
        let (Some(a), Some(b)) = (people.get(i).copied(), people.get(j).copied()) else {
            continue;
        };
        if a.species != Species::Person
            || b.species != Species::Person
            || a.gender == b.gender
            || a.stage != LifeStage::Adult
            || b.stage != LifeStage::Adult
            || a.married
            || b.married
            || lock.either_locked(a.id, b.id)
            || a.position.distance_to(b.position) > config.marry_distance
        {
            continue;
        }
        if !roll(rng, config.marry_chance) {
            continue;
        }

        let family = FamilyId::new();
        link(store, a.id, b.id, family);
        link(store, b.id, a.id, family);
        lock.lock(a.id, b.id);
        for index in [i, j] {
            if let Some(c) = people.get_mut(index) {
                c.married = true;
                c.family = Some(family);
            }
        }
        info!(first = %a.id, second = %b.id, family = %family, "villagers married");
        events.push(VillageEvent::Married {
            first: a.id,
            second: b.id,
            family,
        });
    }
    events
}

fn link(store: &mut EntityStore, id: EntityId, spouse: EntityId, family: FamilyId) {
    if let Some(EntityBody::Living(l)) = store.get_mut(id).map(|e| &mut e.body) {
        l.spouse = Some(spouse);
        l.family = Some(family);
        l.emotion = snowglobe_types::Emotion::InLove;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use snowglobe_types::Bounds;

    use super::*;
    use crate::config::BehaviorConfig;

    fn ctx(config: &BehaviorConfig) -> TickContext<'_> {
        TickContext {
            config,
            bounds: Bounds::new(800.0, 500.0),
            is_night: false,
            is_school_hours: false,
            years_per_tick: 1,
            max_entities: 200,
            max_living: 60,
            max_interior_items: 30,
        }
    }

    fn add(store: &mut EntityStore, species: Species, gender: Gender, at: Position) -> EntityId {
        let living = Living::new("Belle".into(), species, gender, LifeStage::Adult, 25);
        let e = VillageEntity::living(living, at);
        let id = e.id;
        store.push(e);
        id
    }

    fn certain() -> BehaviorConfig {
        BehaviorConfig {
            breed_chance: 1.0,
            marry_chance: 1.0,
            ..BehaviorConfig::default()
        }
    }

    #[test]
    fn close_animals_breed_at_midpoint() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Rabbit, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Rabbit, Gender::Male, Position::new(20.0, 0.0));
        let mut lock = PairLock::new();
        let events = breeding_pass(&mut store, &mut lock, &ctx(&config), &mut SmallRng::seed_from_u64(1));
        assert_eq!(events.len(), 1);
        assert_eq!(store.living_count(), 3);
        let baby = store.entities().last().unwrap();
        assert!(baby.position.distance_to(Position::new(10.0, 0.0)) < 1e-3);
        let l = baby.as_living().unwrap();
        assert_eq!(l.stage, LifeStage::Baby);
        assert_eq!(l.species, Species::Rabbit);
    }

    #[test]
    fn different_species_do_not_breed() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Cat, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Dog, Gender::Male, Position::new(0.0, 0.0));
        let mut lock = PairLock::new();
        assert!(breeding_pass(&mut store, &mut lock, &ctx(&config), &mut SmallRng::seed_from_u64(2)).is_empty());
    }

    #[test]
    fn an_entity_pairs_at_most_once_per_tick() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Person, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Person, Gender::Male, Position::new(0.0, 0.0));
        add(&mut store, Species::Person, Gender::Male, Position::new(0.0, 0.0));
        let mut lock = PairLock::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let births = breeding_pass(&mut store, &mut lock, &ctx(&config), &mut rng);
        let marriages = marriage_pass(&mut store, &mut lock, &ctx(&config), &mut rng);
        assert_eq!(births.len(), 1);
        assert!(marriages.is_empty());
    }

    #[test]
    fn marriage_links_both_partners() {
        let config = certain();
        let mut store = EntityStore::new();
        let a = add(&mut store, Species::Person, Gender::Female, Position::new(0.0, 0.0));
        let b = add(&mut store, Species::Person, Gender::Male, Position::new(10.0, 0.0));
        let mut lock = PairLock::new();
        let events = marriage_pass(&mut store, &mut lock, &ctx(&config), &mut SmallRng::seed_from_u64(4));
        assert_eq!(events.len(), 1);

        let la = store.get(a).unwrap().as_living().unwrap();
        let lb = store.get(b).unwrap().as_living().unwrap();
        assert_eq!(la.spouse, Some(b));
        assert_eq!(lb.spouse, Some(a));
        assert!(la.family.is_some());
        assert_eq!(la.family, lb.family);
    }

    #[test]
    fn married_people_do_not_remarry() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Person, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Person, Gender::Male, Position::new(0.0, 0.0));
        let mut rng = SmallRng::seed_from_u64(5);
        let mut lock = PairLock::new();
        assert_eq!(marriage_pass(&mut store, &mut lock, &ctx(&config), &mut rng).len(), 1);
        let mut lock = PairLock::new();
        assert!(marriage_pass(&mut store, &mut lock, &ctx(&config), &mut rng).is_empty());
    }

    #[test]
    fn animals_never_marry() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Dog, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Dog, Gender::Male, Position::new(0.0, 0.0));
        let mut lock = PairLock::new();
        assert!(marriage_pass(&mut store, &mut lock, &ctx(&config), &mut SmallRng::seed_from_u64(6)).is_empty());
    }

    #[test]
    fn living_cap_stops_births() {
        let config = certain();
        let mut store = EntityStore::new();
        add(&mut store, Species::Bird, Gender::Female, Position::new(0.0, 0.0));
        add(&mut store, Species::Bird, Gender::Male, Position::new(0.0, 0.0));
        let mut capped = ctx(&config);
        capped.max_living = 2;
        let mut lock = PairLock::new();
        assert!(breeding_pass(&mut store, &mut lock, &capped, &mut SmallRng::seed_from_u64(7)).is_empty());
    }
}
