//! Structure interiors: a second placement surface scoped to one building.
//!
//! Occupancy is not stored on the structure. A living entity is inside when
//! its whereabouts reference the structure id, so the outer view and the
//! interior view partition the residents between them.

use snowglobe_types::{
    Bounds, EntityId, InteriorItem, InteriorItemId, InteriorKind, Position, StructureKind,
    VillageEntity,
};
use tracing::info;

use crate::error::WorldError;
use crate::store::EntityStore;

/// Size of every interior placement surface.
pub const INTERIOR_BOUNDS: Bounds = Bounds::new(600.0, 400.0);

/// Everything visible after entering a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorView {
    /// The structure that was entered.
    pub structure_id: EntityId,
    /// What kind of structure it is.
    pub kind: StructureKind,
    /// Items placed inside, in placement order.
    pub items: Vec<InteriorItem>,
    /// Living entities currently inside, in list order.
    pub occupants: Vec<VillageEntity>,
}

/// Enter a structure and collect its interior and occupants.
///
/// # Errors
///
/// Returns [`WorldError::EntityNotFound`] for an unknown id and
/// [`WorldError::NotAStructure`] when the entity is not a building.
pub fn enter(store: &EntityStore, structure_id: EntityId) -> Result<InteriorView, WorldError> {
    let entity = store
        .get(structure_id)
        .ok_or(WorldError::EntityNotFound(structure_id))?;
    let structure = entity
        .as_structure()
        .ok_or(WorldError::NotAStructure(structure_id))?;
    Ok(InteriorView {
        structure_id,
        kind: structure.kind,
        items: structure.interior.clone(),
        occupants: store.occupants(structure_id).cloned().collect(),
    })
}

/// Place an item on a structure's interior surface.
///
/// The position is clamped into [`INTERIOR_BOUNDS`].
///
/// # Errors
///
/// Returns [`WorldError::EntityNotFound`], [`WorldError::NotAStructure`], or
/// [`WorldError::InteriorFull`] when the interior already holds `cap` items.
pub fn place_interior(
    store: &mut EntityStore,
    structure_id: EntityId,
    kind: InteriorKind,
    at: Position,
    cap: usize,
) -> Result<InteriorItemId, WorldError> {
    let entity = store
        .get_mut(structure_id)
        .ok_or(WorldError::EntityNotFound(structure_id))?;
    let structure = entity
        .as_structure_mut()
        .ok_or(WorldError::NotAStructure(structure_id))?;
    if structure.interior.len() >= cap {
        return Err(WorldError::InteriorFull { cap });
    }
    let item = InteriorItem {
        id: InteriorItemId::new(),
        kind,
        position: INTERIOR_BOUNDS.clamp(at),
    };
    let id = item.id;
    structure.interior.push(item);
    info!(structure = %structure_id, item = ?kind, "interior item placed");
    Ok(id)
}

/// Remove an item from a structure's interior.
///
/// # Errors
///
/// Returns [`WorldError::EntityNotFound`], [`WorldError::NotAStructure`], or
/// [`WorldError::InteriorItemNotFound`].
pub fn remove_interior(
    store: &mut EntityStore,
    structure_id: EntityId,
    item_id: InteriorItemId,
) -> Result<InteriorItem, WorldError> {
    let entity = store
        .get_mut(structure_id)
        .ok_or(WorldError::EntityNotFound(structure_id))?;
    let structure = entity
        .as_structure_mut()
        .ok_or(WorldError::NotAStructure(structure_id))?;
    let index = structure
        .interior
        .iter()
        .position(|i| i.id == item_id)
        .ok_or(WorldError::InteriorItemNotFound {
            structure: structure_id,
            item: item_id,
        })?;
    Ok(structure.interior.remove(index))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowglobe_types::{DecorationKind, Gender, LifeStage, Living, Species, Whereabouts};

    use super::*;

    fn house_store() -> (EntityStore, EntityId) {
        let mut store = EntityStore::new();
        let house = VillageEntity::structure(StructureKind::House, Position::new(100.0, 100.0));
        let id = house.id;
        store.push(house);
        (store, id)
    }

    #[test]
    fn enter_lists_items_and_occupants() {
        let (mut store, house) = house_store();
        place_interior(&mut store, house, InteriorKind::Fireplace, Position::new(10.0, 10.0), 30)
            .unwrap();

        let mut inside = Living::new("Joy".into(), Species::Person, Gender::Female, LifeStage::Adult, 30);
        inside.whereabouts = Whereabouts::Home(house);
        store.push(VillageEntity::living(inside, Position::new(100.0, 100.0)));
        let outside = Living::new("Leo".into(), Species::Person, Gender::Male, LifeStage::Adult, 30);
        store.push(VillageEntity::living(outside, Position::new(100.0, 100.0)));

        let view = enter(&store, house).unwrap();
        assert_eq!(view.kind, StructureKind::House);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.occupants.len(), 1);
    }

    #[test]
    fn entering_a_decoration_fails() {
        let mut store = EntityStore::new();
        let tree = VillageEntity::decoration(DecorationKind::Tree, Position::new(0.0, 0.0));
        let id = tree.id;
        store.push(tree);
        assert!(matches!(enter(&store, id), Err(WorldError::NotAStructure(_))));
    }

    #[test]
    fn interior_cap_is_enforced() {
        let (mut store, house) = house_store();
        place_interior(&mut store, house, InteriorKind::Bed, Position::new(0.0, 0.0), 1).unwrap();
        let err = place_interior(&mut store, house, InteriorKind::Lamp, Position::new(0.0, 0.0), 1)
            .unwrap_err();
        assert!(matches!(err, WorldError::InteriorFull { cap: 1 }));
    }

    #[test]
    fn interior_items_can_be_removed() {
        let (mut store, house) = house_store();
        let item = place_interior(&mut store, house, InteriorKind::Table, Position::new(900.0, 900.0), 30)
            .unwrap();
        let view = enter(&store, house).unwrap();
        assert!(INTERIOR_BOUNDS.contains(view.items[0].position));

        let removed = remove_interior(&mut store, house, item).unwrap();
        assert_eq!(removed.kind, InteriorKind::Table);
        assert!(enter(&store, house).unwrap().items.is_empty());
        assert!(matches!(
            remove_interior(&mut store, house, item),
            Err(WorldError::InteriorItemNotFound { .. })
        ));
    }
}
