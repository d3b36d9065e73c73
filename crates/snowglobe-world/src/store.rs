//! The ordered entity store holding the whole village.
//!
//! List order matters: the update pass visits living entities in the order
//! they were placed, and the outer render draws in the same order. Lookups
//! by id are linear, which is fine for a village of tens of entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use snowglobe_types::{
    EntityBody, EntityId, Living, Position, StructureKind, VillageEntity, Whereabouts,
};
use tracing::debug;

/// Back-references cleared by [`EntityStore::repair_references`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Occupants moved outside because their structure no longer exists.
    pub evicted: u32,
    /// Spouse links cleared because the partner no longer exists.
    pub widowed: u32,
}

/// Ordered collection of every entity in the village.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore {
    entities: Vec<VillageEntity>,
}

impl EntityStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Wrap an existing entity list, keeping its order.
    pub const fn from_entities(entities: Vec<VillageEntity>) -> Self {
        Self { entities }
    }

    /// Consume the store and return the entity list.
    pub fn into_entities(self) -> Vec<VillageEntity> {
        self.entities
    }

    /// All entities in list order.
    pub fn entities(&self) -> &[VillageEntity] {
        &self.entities
    }

    /// Iterate over all entities in list order.
    pub fn iter(&self) -> impl Iterator<Item = &VillageEntity> {
        self.entities.iter()
    }

    /// Iterate mutably over all entities in list order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut VillageEntity> {
        self.entities.iter_mut()
    }

    /// Number of entities.
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the village is empty.
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of living entities.
    pub fn living_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_living()).count()
    }

    /// Number of entities matching a predicate.
    pub fn count_where(&self, pred: impl Fn(&VillageEntity) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(e)).count()
    }

    /// Look up an entity by id.
    pub fn get(&self, id: EntityId) -> Option<&VillageEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an entity mutably by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut VillageEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Whether an entity with this id exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Ids of all living entities, in list order.
    pub fn living_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.is_living())
            .map(|e| e.id)
            .collect()
    }

    /// Append an entity at the end of the list.
    pub fn push(&mut self, entity: VillageEntity) {
        self.entities.push(entity);
    }

    /// Remove an entity by id, preserving the order of the rest.
    ///
    /// Does not repair references; callers that remove several entities in
    /// a batch run [`Self::repair_references`] once afterwards.
    pub fn take(&mut self, id: EntityId) -> Option<VillageEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Remove every entity whose id is in `ids`. Returns how many went.
    pub fn take_all(&mut self, ids: &BTreeSet<EntityId>) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !ids.contains(&e.id));
        before.saturating_sub(self.entities.len())
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// The entity nearest to `from` among those matching `pred`.
    pub fn nearest(
        &self,
        from: Position,
        pred: impl Fn(&VillageEntity) -> bool,
    ) -> Option<&VillageEntity> {
        self.entities
            .iter()
            .filter(|e| pred(e))
            .min_by(|a, b| {
                from.distance_to(a.position)
                    .total_cmp(&from.distance_to(b.position))
            })
    }

    /// The nearest structure of a given kind.
    pub fn nearest_structure(&self, from: Position, kind: StructureKind) -> Option<&VillageEntity> {
        self.nearest(from, |e| e.structure_kind() == Some(kind))
    }

    /// Living entities whose whereabouts reference the given structure.
    pub fn occupants(&self, structure: EntityId) -> impl Iterator<Item = &VillageEntity> {
        self.entities.iter().filter(move |e| {
            e.as_living()
                .and_then(|l| l.whereabouts.structure())
                .is_some_and(|s| s == structure)
        })
    }

    /// Clear back-references to entities that no longer exist.
    ///
    /// A `Home` or `School` whereabouts must point at an existing structure
    /// of the matching kind; otherwise the occupant is moved outside. A
    /// spouse link must point at an existing living entity; otherwise it is
    /// cleared and the widowed partner keeps the family id.
    pub fn repair_references(&mut self) -> RepairReport {
        let houses: BTreeSet<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.structure_kind() == Some(StructureKind::House))
            .map(|e| e.id)
            .collect();
        let schools: BTreeSet<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.structure_kind() == Some(StructureKind::School))
            .map(|e| e.id)
            .collect();
        let living: BTreeSet<EntityId> = self.living_ids().into_iter().collect();

        let mut report = RepairReport::default();
        for entity in &mut self.entities {
            let id = entity.id;
            let EntityBody::Living(l) = &mut entity.body else {
                continue;
            };
            if !whereabouts_valid(l, &houses, &schools) {
                debug!(entity = %id, "evicting occupant of a missing structure");
                l.whereabouts = Whereabouts::Outside;
                report.evicted = report.evicted.saturating_add(1);
            }
            if l.spouse.is_some_and(|s| !living.contains(&s)) {
                debug!(entity = %id, "clearing spouse link to a missing partner");
                l.spouse = None;
                report.widowed = report.widowed.saturating_add(1);
            }
        }
        report
    }
}

fn whereabouts_valid(
    living: &Living,
    houses: &BTreeSet<EntityId>,
    schools: &BTreeSet<EntityId>,
) -> bool {
    match living.whereabouts {
        Whereabouts::Outside => true,
        Whereabouts::Home(id) => houses.contains(&id),
        Whereabouts::School(id) => schools.contains(&id),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowglobe_types::{DecorationKind, Gender, LifeStage, Species};

    use super::*;

    fn adult(name: &str, gender: Gender) -> Living {
        Living::new(name.to_owned(), Species::Person, gender, LifeStage::Adult, 30)
    }

    #[test]
    fn take_preserves_order() {
        let mut store = EntityStore::new();
        let a = VillageEntity::decoration(DecorationKind::Tree, Position::new(0.0, 0.0));
        let b = VillageEntity::decoration(DecorationKind::Star, Position::new(1.0, 0.0));
        let c = VillageEntity::decoration(DecorationKind::Gift, Position::new(2.0, 0.0));
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        store.push(a);
        store.push(b);
        store.push(c);

        assert!(store.take(b_id).is_some());
        let ids: Vec<EntityId> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a_id, c_id]);
    }

    #[test]
    fn nearest_picks_closest_match() {
        let mut store = EntityStore::new();
        store.push(VillageEntity::structure(StructureKind::House, Position::new(100.0, 0.0)));
        let near = VillageEntity::structure(StructureKind::House, Position::new(10.0, 0.0));
        let near_id = near.id;
        store.push(near);
        store.push(VillageEntity::structure(StructureKind::School, Position::new(1.0, 0.0)));

        let found = store
            .nearest_structure(Position::new(0.0, 0.0), StructureKind::House)
            .unwrap();
        assert_eq!(found.id, near_id);
    }

    #[test]
    fn repair_evicts_occupants_of_removed_house() {
        let mut store = EntityStore::new();
        let house = VillageEntity::structure(StructureKind::House, Position::new(0.0, 0.0));
        let house_id = house.id;
        store.push(house);

        let mut person = adult("Noel", Gender::Male);
        person.whereabouts = Whereabouts::Home(house_id);
        let person = VillageEntity::living(person, Position::new(0.0, 0.0));
        let person_id = person.id;
        store.push(person);

        store.take(house_id);
        let report = store.repair_references();
        assert_eq!(report.evicted, 1);
        let whereabouts = store.get(person_id).unwrap().as_living().unwrap().whereabouts;
        assert_eq!(whereabouts, Whereabouts::Outside);
    }

    #[test]
    fn repair_clears_home_pointing_at_a_school() {
        let mut store = EntityStore::new();
        let school = VillageEntity::structure(StructureKind::School, Position::new(0.0, 0.0));
        let school_id = school.id;
        store.push(school);

        let mut kid = adult("Ivy", Gender::Female);
        kid.whereabouts = Whereabouts::Home(school_id);
        store.push(VillageEntity::living(kid, Position::new(0.0, 0.0)));

        assert_eq!(store.repair_references().evicted, 1);
    }

    #[test]
    fn repair_widows_partner_and_keeps_family() {
        let mut store = EntityStore::new();
        let family = snowglobe_types::FamilyId::new();
        let mut a = adult("Holly", Gender::Female);
        let mut b = adult("Jack", Gender::Male);
        a.family = Some(family);
        b.family = Some(family);
        let a = VillageEntity::living(a, Position::new(0.0, 0.0));
        let mut b = VillageEntity::living(b, Position::new(0.0, 0.0));
        let a_id = a.id;
        if let Some(l) = b.as_living_mut() {
            l.spouse = Some(a_id);
        }
        let b_id = b.id;
        store.push(a);
        store.push(b);

        store.take(a_id);
        let report = store.repair_references();
        assert_eq!(report.widowed, 1);
        let survivor = store.get(b_id).unwrap().as_living().unwrap();
        assert!(!survivor.is_married());
        assert_eq!(survivor.family, Some(family));
    }
}
