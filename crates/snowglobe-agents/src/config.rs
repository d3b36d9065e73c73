//! Tunable parameters for living-entity behavior.
//!
//! [`BehaviorConfig`] mirrors the `behavior` section of
//! `snowglobe-config.yaml`. Every field has a default, so a partial YAML
//! section only overrides what it names. Call [`BehaviorConfig::validate`]
//! after loading; the update pass assumes a validated config.

use serde::Deserialize;
use snowglobe_types::Species;

use crate::error::AgentError;

/// Lifespan in simulated years per species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Lifespans {
    /// People (default: 80).
    #[serde(default = "default_person_lifespan")]
    pub person: u32,
    /// Dogs (default: 14).
    #[serde(default = "default_dog_lifespan")]
    pub dog: u32,
    /// Cats (default: 16).
    #[serde(default = "default_cat_lifespan")]
    pub cat: u32,
    /// Birds (default: 8).
    #[serde(default = "default_bird_lifespan")]
    pub bird: u32,
    /// Rabbits (default: 10).
    #[serde(default = "default_rabbit_lifespan")]
    pub rabbit: u32,
    /// Squirrels (default: 7).
    #[serde(default = "default_squirrel_lifespan")]
    pub squirrel: u32,
}

impl Lifespans {
    /// Lifespan for one species.
    pub const fn for_species(&self, species: Species) -> u32 {
        match species {
            Species::Person => self.person,
            Species::Dog => self.dog,
            Species::Cat => self.cat,
            Species::Bird => self.bird,
            Species::Rabbit => self.rabbit,
            Species::Squirrel => self.squirrel,
        }
    }
}

impl Default for Lifespans {
    fn default() -> Self {
        Self {
            person: default_person_lifespan(),
            dog: default_dog_lifespan(),
            cat: default_cat_lifespan(),
            bird: default_bird_lifespan(),
            rabbit: default_rabbit_lifespan(),
            squirrel: default_squirrel_lifespan(),
        }
    }
}

/// Ages (in simulated years) at which life stages change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Maturity {
    /// A baby person becomes a kid (default: 3).
    #[serde(default = "default_kid_age")]
    pub kid: u32,
    /// A kid becomes a teenager (default: 13).
    #[serde(default = "default_teen_age")]
    pub teenager: u32,
    /// A teenager becomes an adult (default: 18).
    #[serde(default = "default_adult_age")]
    pub adult: u32,
    /// A baby animal becomes an adult (default: 1).
    #[serde(default = "default_animal_adult_age")]
    pub animal_adult: u32,
}

impl Default for Maturity {
    fn default() -> Self {
        Self {
            kid: default_kid_age(),
            teenager: default_teen_age(),
            adult: default_adult_age(),
            animal_adult: default_animal_adult_age(),
        }
    }
}

/// Every tunable used by the per-entity update and the pair passes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Hunger points lost per tick (default: 4).
    #[serde(default = "default_hunger_decay")]
    pub hunger_decay: u32,
    /// Thirst points lost per tick (default: 5).
    #[serde(default = "default_thirst_decay")]
    pub thirst_decay: u32,
    /// Below this hunger an entity looks for food (default: 50).
    #[serde(default = "default_hungry_below")]
    pub hungry_below: u32,
    /// Below this thirst an entity looks for water (default: 50).
    #[serde(default = "default_thirsty_below")]
    pub thirsty_below: u32,
    /// Hunger restored by one unit of food (default: 40).
    #[serde(default = "default_food_value")]
    pub food_value: u32,
    /// Thirst restored by one unit of water (default: 40).
    #[serde(default = "default_water_value")]
    pub water_value: u32,

    /// Lifespans per species.
    #[serde(default)]
    pub lifespans: Lifespans,
    /// Life-stage thresholds.
    #[serde(default)]
    pub maturity: Maturity,

    /// Pixels walked per tick toward a target (default: 30).
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    /// Maximum pixels per axis for a random wander step (default: 20).
    #[serde(default = "default_wander_step")]
    pub wander_step: f32,
    /// Reach for entering buildings and touching items (default: 30).
    #[serde(default = "default_interaction_distance")]
    pub interaction_distance: f32,

    /// Chance an adult chops an adjacent tree (default: 0.1).
    #[serde(default = "default_chop_chance")]
    pub chop_chance: f64,
    /// Wood left behind by one chop (default: 2).
    #[serde(default = "default_wood_per_chop")]
    pub wood_per_chop: u32,
    /// Chance a hungry entity harvests food from a tree (default: 0.05).
    #[serde(default = "default_harvest_chance")]
    pub harvest_chance: f64,
    /// Chance a kid or teenager opens an adjacent gift (default: 0.25).
    #[serde(default = "default_gift_chance")]
    pub gift_chance: f64,
    /// Carried wood needed to build a house (default: 10).
    #[serde(default = "default_build_wood")]
    pub build_wood: u32,
    /// Chance to build once enough wood is carried (default: 0.3).
    #[serde(default = "default_build_chance")]
    pub build_chance: f64,

    /// Maximum distance between breeding partners (default: 40).
    #[serde(default = "default_breed_distance")]
    pub breed_distance: f32,
    /// Chance a qualifying pair breeds in one tick (default: 0.05).
    #[serde(default = "default_breed_chance")]
    pub breed_chance: f64,
    /// Maximum distance between marrying partners (default: 30).
    #[serde(default = "default_marry_distance")]
    pub marry_distance: f32,
    /// Chance a qualifying pair marries in one tick (default: 0.1).
    #[serde(default = "default_marry_chance")]
    pub marry_chance: f64,
    /// Maximum distance between merging decorations (default: 50).
    #[serde(default = "default_merge_distance")]
    pub merge_distance: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            hunger_decay: default_hunger_decay(),
            thirst_decay: default_thirst_decay(),
            hungry_below: default_hungry_below(),
            thirsty_below: default_thirsty_below(),
            food_value: default_food_value(),
            water_value: default_water_value(),
            lifespans: Lifespans::default(),
            maturity: Maturity::default(),
            walk_speed: default_walk_speed(),
            wander_step: default_wander_step(),
            interaction_distance: default_interaction_distance(),
            chop_chance: default_chop_chance(),
            wood_per_chop: default_wood_per_chop(),
            harvest_chance: default_harvest_chance(),
            gift_chance: default_gift_chance(),
            build_wood: default_build_wood(),
            build_chance: default_build_chance(),
            breed_distance: default_breed_distance(),
            breed_chance: default_breed_chance(),
            marry_distance: default_marry_distance(),
            marry_chance: default_marry_chance(),
            merge_distance: default_merge_distance(),
        }
    }
}

impl BehaviorConfig {
    /// Check that probabilities, distances, and thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidProbability`] for a chance outside
    /// `[0, 1]`, [`AgentError::InvalidDistance`] for a negative or
    /// non-finite distance, and [`AgentError::InvalidThreshold`] for
    /// meter thresholds above 100 or out-of-order maturity ages.
    pub fn validate(&self) -> Result<(), AgentError> {
        for (field, value) in [
            ("chop_chance", self.chop_chance),
            ("harvest_chance", self.harvest_chance),
            ("gift_chance", self.gift_chance),
            ("build_chance", self.build_chance),
            ("breed_chance", self.breed_chance),
            ("marry_chance", self.marry_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AgentError::InvalidProbability { field, value });
            }
        }
        for (field, value) in [
            ("walk_speed", self.walk_speed),
            ("wander_step", self.wander_step),
            ("interaction_distance", self.interaction_distance),
            ("breed_distance", self.breed_distance),
            ("marry_distance", self.marry_distance),
            ("merge_distance", self.merge_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AgentError::InvalidDistance { field, value });
            }
        }
        if self.hungry_below > 100 || self.thirsty_below > 100 {
            return Err(AgentError::InvalidThreshold {
                reason: String::from("hunger and thirst thresholds must be at most 100"),
            });
        }
        let m = &self.maturity;
        if !(m.kid < m.teenager && m.teenager < m.adult) {
            return Err(AgentError::InvalidThreshold {
                reason: format!(
                    "maturity ages must increase: kid {}, teenager {}, adult {}",
                    m.kid, m.teenager, m.adult
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_person_lifespan() -> u32 {
    80
}

const fn default_dog_lifespan() -> u32 {
    14
}

const fn default_cat_lifespan() -> u32 {
    16
}

const fn default_bird_lifespan() -> u32 {
    8
}

const fn default_rabbit_lifespan() -> u32 {
    10
}

const fn default_squirrel_lifespan() -> u32 {
    7
}

const fn default_kid_age() -> u32 {
    3
}

const fn default_teen_age() -> u32 {
    13
}

const fn default_adult_age() -> u32 {
    18
}

const fn default_animal_adult_age() -> u32 {
    1
}

const fn default_hunger_decay() -> u32 {
    4
}

const fn default_thirst_decay() -> u32 {
    5
}

const fn default_hungry_below() -> u32 {
    50
}

const fn default_thirsty_below() -> u32 {
    50
}

const fn default_food_value() -> u32 {
    40
}

const fn default_water_value() -> u32 {
    40
}

const fn default_walk_speed() -> f32 {
    30.0
}

const fn default_wander_step() -> f32 {
    20.0
}

const fn default_interaction_distance() -> f32 {
    30.0
}

const fn default_chop_chance() -> f64 {
    0.1
}

const fn default_wood_per_chop() -> u32 {
    2
}

const fn default_harvest_chance() -> f64 {
    0.05
}

const fn default_gift_chance() -> f64 {
    0.25
}

const fn default_build_wood() -> u32 {
    10
}

const fn default_build_chance() -> f64 {
    0.3
}

const fn default_breed_distance() -> f32 {
    40.0
}

const fn default_breed_chance() -> f64 {
    0.05
}

const fn default_marry_distance() -> f32 {
    30.0
}

const fn default_marry_chance() -> f64 {
    0.1
}

const fn default_merge_distance() -> f32 {
    50.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BehaviorConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: BehaviorConfig = serde_yml::from_str("hunger_decay: 7\nlifespans:\n  dog: 20\n").unwrap();
        assert_eq!(config.hunger_decay, 7);
        assert_eq!(config.thirst_decay, 5);
        assert_eq!(config.lifespans.dog, 20);
        assert_eq!(config.lifespans.person, 80);
    }

    #[test]
    fn probability_above_one_is_rejected() {
        let config = BehaviorConfig {
            marry_chance: 1.5,
            ..BehaviorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentError::InvalidProbability { field: "marry_chance", .. })
        ));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let config = BehaviorConfig {
            walk_speed: -1.0,
            ..BehaviorConfig::default()
        };
        assert!(matches!(config.validate(), Err(AgentError::InvalidDistance { .. })));
    }

    #[test]
    fn unordered_maturity_is_rejected() {
        let config = BehaviorConfig {
            maturity: Maturity {
                kid: 10,
                teenager: 5,
                adult: 18,
                animal_adult: 1,
            },
            ..BehaviorConfig::default()
        };
        assert!(matches!(config.validate(), Err(AgentError::InvalidThreshold { .. })));
    }

    #[test]
    fn lifespan_lookup_by_species() {
        let spans = Lifespans::default();
        assert_eq!(spans.for_species(Species::Person), 80);
        assert_eq!(spans.for_species(Species::Squirrel), 7);
    }
}
