//! Movement target selection for living entities.
//!
//! Priorities, highest first:
//!
//! 1. At night people head to the nearest house and stay inside until day.
//! 2. During school hours kids and teenagers head to the nearest school.
//! 3. Thirsty entities head to the nearest lake or water pickup.
//! 4. Hungry entities head to the nearest food pickup or tree.
//! 5. People carrying toys head to the nearest house to decorate it.
//! 6. Kids with nothing else to do head to the park.
//! 7. Everyone else wanders.
//!
//! Entering a building happens on arrival within reach; the entity snaps
//! to the building's position. Positions are always clamped to the world.

use rand::Rng;
use snowglobe_types::{
    DecorationKind, EntityBody, LifeStage, Living, PickupKind, Position, Species, StructureKind,
    VillageEntity, Whereabouts,
};

use crate::context::TickContext;
use crate::vitals::{is_hungry, is_thirsty};
use snowglobe_world::EntityStore;
use snowglobe_world::geometry::{random_step, step_toward};

/// Where an entity decided to go this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Stay inside the current building.
    Stay,
    /// Walk to a building and go in once within reach.
    Enter {
        /// Building position.
        at: Position,
        /// Whereabouts once inside.
        inside: Whereabouts,
    },
    /// Walk toward a point in the outer world.
    Walk(Position),
    /// Take a random step.
    Wander,
}

const fn is_student(living: &Living) -> bool {
    matches!(living.species, Species::Person)
        && matches!(living.stage, LifeStage::Kid | LifeStage::Teenager)
}

fn is_water_source(entity: &VillageEntity) -> bool {
    match &entity.body {
        EntityBody::Decoration(d) => d.kind == DecorationKind::Lake,
        EntityBody::Pickup(p) => p.kind == PickupKind::Water,
        _ => false,
    }
}

fn is_food_source(entity: &VillageEntity) -> bool {
    match &entity.body {
        EntityBody::Decoration(d) => d.kind == DecorationKind::Tree,
        EntityBody::Pickup(p) => p.kind == PickupKind::Food,
        _ => false,
    }
}

/// Decide where a living entity goes this tick.
///
/// Leaving a building is applied directly to `living.whereabouts`: people
/// leave home at daybreak and students leave school when it lets out.
pub fn choose_intent(
    store: &EntityStore,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
) -> Intent {
    let person = living.species == Species::Person;
    let student = is_student(living);

    if person && ctx.is_night {
        if matches!(living.whereabouts, Whereabouts::Home(_)) {
            return Intent::Stay;
        }
        living.whereabouts = Whereabouts::Outside;
        if let Some(house) = store.nearest_structure(position, StructureKind::House) {
            return Intent::Enter {
                at: house.position,
                inside: Whereabouts::Home(house.id),
            };
        }
    }

    if matches!(living.whereabouts, Whereabouts::Home(_)) {
        living.whereabouts = Whereabouts::Outside;
    }

    if student && ctx.is_school_hours {
        if matches!(living.whereabouts, Whereabouts::School(_)) {
            return Intent::Stay;
        }
        if let Some(school) = store.nearest_structure(position, StructureKind::School) {
            return Intent::Enter {
                at: school.position,
                inside: Whereabouts::School(school.id),
            };
        }
    }

    if matches!(living.whereabouts, Whereabouts::School(_)) {
        living.whereabouts = Whereabouts::Outside;
    }

    let config = ctx.config;
    if is_thirsty(living, config)
        && let Some(source) = store.nearest(position, is_water_source)
    {
        return Intent::Walk(source.position);
    }
    if is_hungry(living, config)
        && let Some(source) = store.nearest(position, is_food_source)
    {
        return Intent::Walk(source.position);
    }
    if person
        && living.carried.toys > 0
        && let Some(house) = store.nearest_structure(position, StructureKind::House)
    {
        return Intent::Walk(house.position);
    }
    if person
        && living.stage == LifeStage::Kid
        && let Some(park) = store.nearest(position, |e| {
            e.decoration_kind() == Some(DecorationKind::Park)
        })
    {
        return Intent::Walk(park.position);
    }
    Intent::Wander
}

/// Carry out an intent and return the new position.
pub fn apply_intent<R: Rng + ?Sized>(
    intent: Intent,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Position {
    let config = ctx.config;
    let next = match intent {
        Intent::Stay => position,
        Intent::Enter { at, inside } => {
            if position.distance_to(at) <= config.interaction_distance {
                living.whereabouts = inside;
                at
            } else {
                step_toward(position, at, config.walk_speed)
            }
        }
        Intent::Walk(target) => step_toward(position, target, config.walk_speed),
        Intent::Wander => random_step(position, config.wander_step, rng),
    };
    ctx.bounds.clamp(next)
}

/// Choose and carry out this tick's movement.
pub fn move_living<R: Rng + ?Sized>(
    store: &EntityStore,
    position: Position,
    living: &mut Living,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Position {
    let intent = choose_intent(store, position, living, ctx);
    apply_intent(intent, position, living, ctx, rng)
}
