//! Notable things that happen during a tick.
//!
//! Events are collected into the tick summary and streamed to observers.
//! They are informational only; nothing replays them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DecorationKind, LifeStage, Species};
use crate::ids::{EntityId, FamilyId};
use crate::structs::Position;

/// Why a living entity died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DeathCause {
    /// Hunger meter reached zero.
    Starvation,
    /// Thirst meter reached zero.
    Dehydration,
    /// Reached the species lifespan.
    OldAge,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Dehydration => write!(f, "dehydration"),
            Self::OldAge => write!(f, "old_age"),
        }
    }
}

/// A single notable occurrence in the village.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum VillageEvent {
    /// A baby was born.
    Born {
        /// The newborn.
        id: EntityId,
        /// The newborn's name.
        name: String,
        /// The newborn's species.
        species: Species,
    },
    /// A living entity died and was removed.
    Died {
        /// The deceased.
        id: EntityId,
        /// The deceased's name.
        name: String,
        /// Cause of death.
        cause: DeathCause,
    },
    /// A living entity reached a new life stage.
    GrewUp {
        /// Who grew up.
        id: EntityId,
        /// Their name.
        name: String,
        /// The stage reached.
        stage: LifeStage,
    },
    /// Two villagers married and started a family.
    Married {
        /// First spouse.
        first: EntityId,
        /// Second spouse.
        second: EntityId,
        /// The new family id shared by both.
        family: FamilyId,
    },
    /// A villager built a new house from wood.
    Built {
        /// Who built it.
        builder: EntityId,
        /// The new house.
        house: EntityId,
    },
    /// A villager chopped a tree and left wood behind.
    Chopped {
        /// Who chopped.
        by: EntityId,
        /// The tree.
        tree: EntityId,
    },
    /// Food was harvested from a tree.
    Harvested {
        /// Who harvested.
        by: EntityId,
        /// The tree.
        tree: EntityId,
    },
    /// A kid opened a gift and found a toy.
    OpenedGift {
        /// Who opened it.
        by: EntityId,
    },
    /// A villager left a toy inside a house.
    Decorated {
        /// Who decorated.
        by: EntityId,
        /// The decorated house.
        house: EntityId,
    },
    /// Three decorations merged into the next tier.
    Merged {
        /// The produced decoration.
        into: DecorationKind,
        /// Where it was placed.
        position: Position,
    },
}
