//! Death conditions and what a dead entity leaves behind.
//!
//! A living entity dies when either meter reaches zero or its age reaches
//! the species lifespan. Whatever it carried drops as pickups where it
//! stood, whatever its life stage.

use snowglobe_types::{DeathCause, Living, Position, VillageEntity};

use crate::config::Lifespans;

/// Check whether a living entity meets any death condition.
///
/// Starvation is reported before dehydration when both meters are empty.
pub const fn check_death(living: &Living, lifespans: &Lifespans) -> Option<DeathCause> {
    if living.hunger == 0 {
        return Some(DeathCause::Starvation);
    }
    if living.thirst == 0 {
        return Some(DeathCause::Dehydration);
    }
    if living.age_years >= lifespans.for_species(living.species) {
        return Some(DeathCause::OldAge);
    }
    None
}

/// Pickups dropped by a dead entity, one per carried resource kind.
pub fn drop_carried(living: &Living, position: Position) -> Vec<VillageEntity> {
    living
        .carried
        .as_pickups()
        .into_iter()
        .map(|(kind, quantity)| VillageEntity::pickup(kind, quantity, position))
        .collect()
}
