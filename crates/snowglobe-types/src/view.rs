//! View payloads handed to the browser front end.
//!
//! These carry no state of consequence. They are rebuilt from the village
//! state on every request or tick broadcast and never read back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::enums::{Species, StructureKind};
use crate::ids::EntityId;

/// A short sound the front end plays when a character is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SoundCue {
    /// Sleigh bells, for people.
    Bells,
    /// A dog bark.
    Bark,
    /// A cat meow.
    Meow,
    /// A bird chirp.
    Chirp,
    /// A rabbit squeak.
    Squeak,
    /// A squirrel chitter.
    Chitter,
}

impl SoundCue {
    /// The cue played for a species.
    pub const fn for_species(species: Species) -> Self {
        match species {
            Species::Person => Self::Bells,
            Species::Dog => Self::Bark,
            Species::Cat => Self::Meow,
            Species::Bird => Self::Chirp,
            Species::Rabbit => Self::Squeak,
            Species::Squirrel => Self::Chitter,
        }
    }
}

/// One drawable thing on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Sprite {
    /// Id of the entity or interior item this sprite draws.
    pub id: Uuid,
    /// Icon key the front end maps to an image asset.
    pub icon: String,
    /// Horizontal position on the surface.
    pub x: f32,
    /// Vertical position on the surface.
    pub y: f32,
    /// Name label shown under living entities.
    pub label: Option<String>,
    /// Speech bubble text derived from the entity's emotion.
    pub bubble: Option<String>,
    /// Sound played when the sprite is clicked.
    pub sound: Option<SoundCue>,
}

/// The outer village as a flat list of sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RenderFrame {
    /// Tick that produced this state.
    pub tick: u64,
    /// Current simulated year.
    pub year: u64,
    /// Current simulated hour (0..24).
    pub hour: u32,
    /// Whether the scene should be drawn at night.
    pub is_night: bool,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Everything visible in the outer world. Indoor occupants are omitted.
    pub sprites: Vec<Sprite>,
}

/// The inside of a single structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteriorFrame {
    /// The structure being viewed.
    pub structure_id: EntityId,
    /// What kind of structure it is.
    pub kind: StructureKind,
    /// Interior surface width in pixels.
    pub width: f32,
    /// Interior surface height in pixels.
    pub height: f32,
    /// Placed interior items.
    pub items: Vec<Sprite>,
    /// Living entities currently inside.
    pub occupants: Vec<Sprite>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_species_has_a_distinct_sound() {
        let mut cues: Vec<SoundCue> = Species::ALL.iter().map(|s| SoundCue::for_species(*s)).collect();
        let before = cues.len();
        cues.dedup();
        assert_eq!(cues.len(), before);
    }
}
