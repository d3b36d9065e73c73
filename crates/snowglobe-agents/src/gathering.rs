//! Proximity interactions: eating, drinking, picking up, chopping,
//! harvesting, opening gifts, building, and decorating.
//!
//! Interactions only happen in the outer world and only with entities
//! within the interaction distance. Every chance is an independent draw.

use rand::Rng;
use snowglobe_types::{
    DecorationKind, EntityBody, EntityId, Emotion, InteriorKind, LifeStage, Living, Pickup,
    PickupKind, Position, Species, StructureKind, VillageEntity, VillageEvent,
};
use snowglobe_world::geometry::offset;
use snowglobe_world::{EntityStore, INTERIOR_BOUNDS, place_interior};
use tracing::debug;

use crate::context::{TickContext, roll};
use crate::vitals::{drink, drink_to_full, eat, is_hungry, is_thirsty};

/// How much of one pickup an entity takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Take {
    /// Leave it where it is.
    Nothing,
    /// Consume one unit on the spot.
    ConsumeOne,
    /// Put the whole pile in the carried counts.
    CarryAll,
}

const fn can_carry(living: &Living) -> bool {
    matches!(living.species, Species::Person) && !matches!(living.stage, LifeStage::Baby)
}

fn decide_take(living: &Living, pickup: Pickup, ctx: &TickContext<'_>) -> Take {
    let config = ctx.config;
    match pickup.kind {
        PickupKind::Food if is_hungry(living, config) => Take::ConsumeOne,
        PickupKind::Water if is_thirsty(living, config) => Take::ConsumeOne,
        PickupKind::Food | PickupKind::Water | PickupKind::Toy if can_carry(living) => {
            Take::CarryAll
        }
        PickupKind::Wood if can_carry(living) && living.is_adult() => Take::CarryAll,
        _ => Take::Nothing,
    }
}

fn within(from: Position, entity: &VillageEntity, reach: f32) -> bool {
    from.distance_to(entity.position) <= reach
}

/// Pick up or consume pickups within reach.
fn handle_pickups(
    store: &mut EntityStore,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
) {
    let reach = ctx.config.interaction_distance;
    let nearby: Vec<(EntityId, Pickup)> = store
        .iter()
        .filter(|e| within(position, e, reach))
        .filter_map(|e| e.as_pickup().map(|p| (e.id, p)))
        .collect();

    for (pickup_id, pickup) in nearby {
        let remaining = match decide_take(living, pickup, ctx) {
            Take::Nothing => continue,
            Take::ConsumeOne => {
                match pickup.kind {
                    PickupKind::Food => eat(living, ctx.config),
                    _ => drink(living, ctx.config),
                }
                pickup.quantity.saturating_sub(1)
            }
            Take::CarryAll => {
                living.carried.add(pickup.kind, pickup.quantity);
                0
            }
        };
        if remaining == 0 {
            store.take(pickup_id);
        } else if let Some(EntityBody::Pickup(p)) = store.get_mut(pickup_id).map(|e| &mut e.body) {
            p.quantity = remaining;
        }
    }
}

/// Drink, chop, harvest, and open gifts next to decorations within reach.
fn handle_decorations<R: Rng + ?Sized>(
    store: &mut EntityStore,
    id: EntityId,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
    rng: &mut R,
    events: &mut Vec<VillageEvent>,
) {
    let config = ctx.config;
    let reach = config.interaction_distance;

    if is_thirsty(living, config)
        && store
            .iter()
            .any(|e| e.decoration_kind() == Some(DecorationKind::Lake) && within(position, e, reach))
    {
        drink_to_full(living);
    }

    let tree = store
        .nearest(position, |e| e.decoration_kind() == Some(DecorationKind::Tree))
        .filter(|e| within(position, e, reach))
        .map(|e| (e.id, e.position));
    if let Some((tree_id, tree_pos)) = tree {
        if can_carry(living) && living.is_adult() && roll(rng, config.chop_chance) {
            let at = ctx.bounds.clamp(offset(tree_pos, 12.0, 12.0));
            store.push(VillageEntity::pickup(PickupKind::Wood, config.wood_per_chop, at));
            events.push(VillageEvent::Chopped { by: id, tree: tree_id });
            debug!(entity = %id, tree = %tree_id, "tree chopped");
        }
        if is_hungry(living, config) && roll(rng, config.harvest_chance) {
            let at = ctx.bounds.clamp(offset(tree_pos, -12.0, 12.0));
            store.push(VillageEntity::pickup(PickupKind::Food, 1, at));
            events.push(VillageEvent::Harvested { by: id, tree: tree_id });
        }
    }

    if living.species == Species::Person && matches!(living.stage, LifeStage::Kid | LifeStage::Teenager) {
        let gift = store
            .nearest(position, |e| e.decoration_kind() == Some(DecorationKind::Gift))
            .filter(|e| within(position, e, reach))
            .map(|e| (e.id, e.position));
        if let Some((gift_id, gift_pos)) = gift
            && roll(rng, config.gift_chance)
        {
            store.take(gift_id);
            store.push(VillageEntity::pickup(PickupKind::Toy, 1, gift_pos));
            living.emotion = Emotion::Happy;
            events.push(VillageEvent::OpenedGift { by: id });
        }
    }
}

/// Build a house from carried wood.
fn try_build<R: Rng + ?Sized>(
    store: &mut EntityStore,
    id: EntityId,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
    rng: &mut R,
    events: &mut Vec<VillageEvent>,
) {
    let config = ctx.config;
    if !(can_carry(living) && living.is_adult()) || living.carried.wood < config.build_wood {
        return;
    }
    if store.len() >= ctx.max_entities || !roll(rng, config.build_chance) {
        return;
    }
    let house = VillageEntity::structure(StructureKind::House, ctx.bounds.clamp(offset(position, 40.0, 0.0)));
    let house_id = house.id;
    store.push(house);
    living.carried.wood = living.carried.wood.saturating_sub(config.build_wood);
    living.emotion = Emotion::Proud;
    events.push(VillageEvent::Built { builder: id, house: house_id });
    debug!(entity = %id, house = %house_id, "house built");
}

/// Leave a carried toy inside a house within reach.
fn try_decorate<R: Rng + ?Sized>(
    store: &mut EntityStore,
    id: EntityId,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
    rng: &mut R,
    events: &mut Vec<VillageEvent>,
) {
    if living.carried.toys == 0 || !can_carry(living) {
        return;
    }
    let Some(house_id) = store
        .nearest_structure(position, StructureKind::House)
        .filter(|e| within(position, e, ctx.config.interaction_distance))
        .map(|e| e.id)
    else {
        return;
    };
    let at = Position::new(
        rng.random_range(0.0..=INTERIOR_BOUNDS.width),
        rng.random_range(0.0..=INTERIOR_BOUNDS.height),
    );
    if place_interior(store, house_id, InteriorKind::Toy, at, ctx.max_interior_items).is_ok() {
        living.carried.toys = living.carried.toys.saturating_sub(1);
        living.emotion = Emotion::Happy;
        events.push(VillageEvent::Decorated { by: id, house: house_id });
    }
}

/// Run every proximity interaction for one living entity.
///
/// Does nothing for entities that are inside a building or missing.
pub fn interact<R: Rng + ?Sized>(
    store: &mut EntityStore,
    id: EntityId,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Vec<VillageEvent> {
    let mut events = Vec::new();
    let Some((position, mut living)) = store
        .get(id)
        .and_then(|e| e.as_living().map(|l| (e.position, l.clone())))
    else {
        return events;
    };
    if !living.whereabouts.is_outside() {
        return events;
    }

    handle_pickups(store, position, &mut living, ctx);
    handle_decorations(store, id, position, &mut living, ctx, rng, &mut events);
    try_build(store, id, position, &mut living, ctx, rng, &mut events);
    try_decorate(store, id, position, &mut living, ctx, rng, &mut events);

    if let Some(entity) = store.get_mut(id) {
        entity.body = EntityBody::Living(living);
    }
    events
}
