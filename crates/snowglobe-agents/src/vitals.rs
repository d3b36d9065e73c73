//! Hunger, thirst, aging, and self-care applied to living entities.
//!
//! Meters are satiety levels: 100 is full and 0 is fatal. Decay and
//! restoration saturate so the meters never leave `[0, 100]`.

use snowglobe_types::{Emotion, LifeStage, Living, METER_MAX, Whereabouts};

use crate::config::BehaviorConfig;

/// Age the entity and drain both meters for one tick.
pub fn apply_vitals(living: &mut Living, config: &BehaviorConfig, years: u32) {
    living.age_years = living.age_years.saturating_add(years);
    living.hunger = living.hunger.saturating_sub(config.hunger_decay).min(METER_MAX);
    living.thirst = living.thirst.saturating_sub(config.thirst_decay).min(METER_MAX);
}

/// Whether the entity should look for food.
pub const fn is_hungry(living: &Living, config: &BehaviorConfig) -> bool {
    living.hunger < config.hungry_below
}

/// Whether the entity should look for water.
pub const fn is_thirsty(living: &Living, config: &BehaviorConfig) -> bool {
    living.thirst < config.thirsty_below
}

/// Restore hunger by one unit of food.
pub fn eat(living: &mut Living, config: &BehaviorConfig) {
    living.hunger = living.hunger.saturating_add(config.food_value).min(METER_MAX);
    living.emotion = Emotion::Happy;
}

/// Restore thirst by one unit of water.
pub fn drink(living: &mut Living, config: &BehaviorConfig) {
    living.thirst = living.thirst.saturating_add(config.water_value).min(METER_MAX);
    living.emotion = Emotion::Happy;
}

/// Drink to full from an endless source such as a lake.
pub const fn drink_to_full(living: &mut Living) {
    living.thirst = METER_MAX;
    living.emotion = Emotion::Happy;
}

/// Eat carried food when hungry and drink carried water when thirsty.
///
/// Returns `true` if anything was consumed.
pub fn self_care(living: &mut Living, config: &BehaviorConfig) -> bool {
    let mut consumed = false;
    if is_hungry(living, config) && living.carried.food > 0 {
        living.carried.food = living.carried.food.saturating_sub(1);
        eat(living, config);
        consumed = true;
    }
    if is_thirsty(living, config) && living.carried.water > 0 {
        living.carried.water = living.carried.water.saturating_sub(1);
        drink(living, config);
        consumed = true;
    }
    consumed
}

/// The resting mood for an entity before any interaction this tick.
///
/// Needs outrank everything else; thirst outranks hunger because it
/// drains faster.
pub const fn baseline_emotion(living: &Living, config: &BehaviorConfig, is_night: bool) -> Emotion {
    if is_thirsty(living, config) {
        return Emotion::Thirsty;
    }
    if is_hungry(living, config) {
        return Emotion::Hungry;
    }
    match living.whereabouts {
        Whereabouts::School(_) => Emotion::Studious,
        Whereabouts::Home(_) => Emotion::Sleepy,
        Whereabouts::Outside => {
            if is_night {
                Emotion::Sleepy
            } else if matches!(living.stage, LifeStage::Kid | LifeStage::Baby) && living.carried.toys > 0 {
                Emotion::Playful
            } else {
                Emotion::Content
            }
        }
    }
}
