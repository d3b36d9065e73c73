//! Enumeration types for the Snowglobe village.
//!
//! Every kind tag that discriminates a [`VillageEntity`] lives here, plus
//! the two placement palettes (outer world and structure interiors).
//!
//! [`VillageEntity`]: crate::structs::VillageEntity

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Structures
// ---------------------------------------------------------------------------

/// A building that can be entered and decorated from the inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StructureKind {
    /// A family home. People shelter here at night.
    House,
    /// Kids and teenagers attend during school hours.
    School,
    /// A church. Decorative, may be entered and furnished.
    Church,
}

// ---------------------------------------------------------------------------
// Decorations and landmarks
// ---------------------------------------------------------------------------

/// A static decorative item or landmark in the outer world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DecorationKind {
    /// A fir tree. Can be chopped for wood or harvested for food.
    Tree,
    /// A glowing star.
    Star,
    /// A single snowflake. Three close flakes merge into snow.
    Snowflake,
    /// A pile of snow. Three close piles merge into a snowman.
    Snow,
    /// A finished snowman.
    Snowman,
    /// A wrapped gift. Kids may open it to find a toy.
    Gift,
    /// A frozen-over lake with an ice hole. An endless water source.
    Lake,
    /// A park where kids play when they have nothing else to do.
    Park,
}

impl DecorationKind {
    /// The item produced when three of this kind cluster together, if any.
    pub const fn next_tier(self) -> Option<Self> {
        match self {
            Self::Snowflake => Some(Self::Snow),
            Self::Snow => Some(Self::Snowman),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pickups
// ---------------------------------------------------------------------------

/// A resource lying on the ground that living entities pick up or consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PickupKind {
    /// Something to eat.
    Food,
    /// A bucket of water.
    Water,
    /// A toy, usually found inside a gift.
    Toy,
    /// Logs from a chopped tree.
    Wood,
}

// ---------------------------------------------------------------------------
// Living entities
// ---------------------------------------------------------------------------

/// Species of a living entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// A villager.
    Person,
    /// A dog.
    Dog,
    /// A cat.
    Cat,
    /// A bird.
    Bird,
    /// A rabbit.
    Rabbit,
    /// A squirrel.
    Squirrel,
}

impl Species {
    /// Every species, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Person,
        Self::Dog,
        Self::Cat,
        Self::Bird,
        Self::Rabbit,
        Self::Squirrel,
    ];

    /// Whether this species is one of the village animals.
    pub const fn is_animal(self) -> bool {
        !matches!(self, Self::Person)
    }
}

/// Gender of a living entity. Pairing requires opposite genders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
}

impl Gender {
    /// The other gender.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Female => Self::Male,
            Self::Male => Self::Female,
        }
    }
}

/// Life stage of a living entity. Stages only ever advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum LifeStage {
    /// Newborn.
    Baby,
    /// Old enough for school.
    Kid,
    /// Still at school, not yet allowed to marry.
    Teenager,
    /// Fully grown. Works, marries, and has children.
    Adult,
}

impl LifeStage {
    /// The stage this one grows into at maturity for the given species.
    ///
    /// People pass through every stage. Animals go straight from baby to
    /// adult. Adults have no growth target.
    pub const fn growth_target(self, species: Species) -> Option<Self> {
        let next = match self {
            Self::Baby => Self::Kid,
            Self::Kid => Self::Teenager,
            Self::Teenager => Self::Adult,
            Self::Adult => return None,
        };
        if species.is_animal() && matches!(self, Self::Baby) {
            Some(Self::Adult)
        } else {
            Some(next)
        }
    }
}

/// Mood shown in a speech bubble above a living entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Emotion {
    /// Nothing to report.
    Content,
    /// Just ate, drank, or found something nice.
    Happy,
    /// Looking for food.
    Hungry,
    /// Looking for water.
    Thirsty,
    /// Heading home for the night or already asleep.
    Sleepy,
    /// Playing in the park or with a toy.
    Playful,
    /// At school.
    Studious,
    /// Just married.
    InLove,
    /// Just built something or had a baby.
    Proud,
}

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// Items placed inside a structure's interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum InteriorKind {
    /// A small indoor Christmas tree.
    Tree,
    /// A star ornament.
    Star,
    /// A wrapped gift.
    Gift,
    /// A toy left by a villager.
    Toy,
    /// A fireplace.
    Fireplace,
    /// A bed.
    Bed,
    /// A table.
    Table,
    /// A lamp.
    Lamp,
}

impl InteriorKind {
    /// The interior palette, in display order.
    pub const ALL: [Self; 8] = [
        Self::Tree,
        Self::Star,
        Self::Gift,
        Self::Toy,
        Self::Fireplace,
        Self::Bed,
        Self::Table,
        Self::Lamp,
    ];
}

/// Items a user can drop onto the outer village world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PaletteItem {
    /// A house.
    House,
    /// A school.
    School,
    /// A church.
    Church,
    /// A tree.
    Tree,
    /// A star.
    Star,
    /// A snowflake.
    Snowflake,
    /// A gift.
    Gift,
    /// A lake.
    Lake,
    /// A park.
    Park,
    /// A food pickup.
    Food,
    /// A water pickup.
    Water,
    /// A toy pickup.
    Toy,
    /// A single adult villager.
    Person,
    /// A married couple with one kid.
    Family,
    /// A baby villager.
    Baby,
    /// A dog.
    Dog,
    /// A cat.
    Cat,
    /// A bird.
    Bird,
    /// A rabbit.
    Rabbit,
    /// A squirrel.
    Squirrel,
}

impl PaletteItem {
    /// The outer world palette, in display order.
    pub const ALL: [Self; 20] = [
        Self::House,
        Self::School,
        Self::Church,
        Self::Tree,
        Self::Star,
        Self::Snowflake,
        Self::Gift,
        Self::Lake,
        Self::Park,
        Self::Food,
        Self::Water,
        Self::Toy,
        Self::Person,
        Self::Family,
        Self::Baby,
        Self::Dog,
        Self::Cat,
        Self::Bird,
        Self::Rabbit,
        Self::Squirrel,
    ];

    /// Human-readable label used in placement notices.
    pub const fn label(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::School => "School",
            Self::Church => "Church",
            Self::Tree => "Tree",
            Self::Star => "Star",
            Self::Snowflake => "Snowflake",
            Self::Gift => "Gift",
            Self::Lake => "Lake",
            Self::Park => "Park",
            Self::Food => "Food",
            Self::Water => "Water",
            Self::Toy => "Toy",
            Self::Person => "Person",
            Self::Family => "Family",
            Self::Baby => "Baby",
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Bird => "Bird",
            Self::Rabbit => "Rabbit",
            Self::Squirrel => "Squirrel",
        }
    }
}
