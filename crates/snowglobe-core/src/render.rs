//! Pure mapping from village state to front-end view payloads.
//!
//! The outer frame draws every entity that is outside; residents sheltering
//! in a house or sitting in school appear only in that structure's
//! interior frame.

use snowglobe_types::{
    DecorationKind, EntityBody, EntityId, Emotion, InteriorItem, InteriorKind, InteriorFrame, LifeStage,
    Living, PickupKind, RenderFrame, SoundCue, Species, Sprite, StructureKind, VillageEntity,
};
use snowglobe_world::{INTERIOR_BOUNDS, WorldError, enter};

use crate::tick::VillageState;

/// Vertical position of the occupant row inside a structure.
const OCCUPANT_ROW_Y: f32 = 340.0;

/// Horizontal spacing between occupants inside a structure.
const OCCUPANT_SPACING: f32 = 60.0;

/// Render the outer village.
pub fn render_frame(state: &VillageState) -> RenderFrame {
    let sprites = state
        .entities()
        .iter()
        .filter(|e| e.as_living().is_none_or(|l| l.whereabouts.is_outside()))
        .map(entity_sprite)
        .collect();
    RenderFrame {
        tick: state.clock.tick(),
        year: state.clock.year(),
        hour: state.clock.hour(),
        is_night: state.clock.is_night(),
        width: state.bounds.width,
        height: state.bounds.height,
        sprites,
    }
}

/// Render the inside of one structure.
///
/// Occupants are laid out in a row along the floor in list order.
///
/// # Errors
///
/// Returns [`WorldError::EntityNotFound`] or [`WorldError::NotAStructure`]
/// when `structure_id` does not name a building.
pub fn interior_frame(state: &VillageState, structure_id: EntityId) -> Result<InteriorFrame, WorldError> {
    let view = enter(&state.store, structure_id)?;
    let items = view.items.iter().map(interior_sprite).collect();
    let mut x = OCCUPANT_SPACING;
    let mut occupants = Vec::with_capacity(view.occupants.len());
    for entity in &view.occupants {
        let mut sprite = entity_sprite(entity);
        sprite.x = x.min(INTERIOR_BOUNDS.width);
        sprite.y = OCCUPANT_ROW_Y;
        occupants.push(sprite);
        x += OCCUPANT_SPACING;
    }
    Ok(InteriorFrame {
        structure_id,
        kind: view.kind,
        width: INTERIOR_BOUNDS.width,
        height: INTERIOR_BOUNDS.height,
        items,
        occupants,
    })
}

fn entity_sprite(entity: &VillageEntity) -> Sprite {
    let (icon, label, bubble, sound) = match &entity.body {
        EntityBody::Structure(s) => (structure_icon(s.kind).to_owned(), None, None, None),
        EntityBody::Decoration(d) => (decoration_icon(d.kind).to_owned(), None, None, None),
        EntityBody::Pickup(p) => (pickup_icon(p.kind).to_owned(), None, None, None),
        EntityBody::Living(l) => (
            living_icon(l),
            Some(l.name.clone()),
            bubble(l.emotion).map(str::to_owned),
            Some(SoundCue::for_species(l.species)),
        ),
    };
    Sprite {
        id: entity.id.into_inner(),
        icon,
        x: entity.position.x,
        y: entity.position.y,
        label,
        bubble,
        sound,
    }
}

fn interior_sprite(item: &InteriorItem) -> Sprite {
    Sprite {
        id: item.id.into_inner(),
        icon: interior_icon(item.kind).to_owned(),
        x: item.position.x,
        y: item.position.y,
        label: None,
        bubble: None,
        sound: None,
    }
}

const fn structure_icon(kind: StructureKind) -> &'static str {
    match kind {
        StructureKind::House => "house",
        StructureKind::School => "school",
        StructureKind::Church => "church",
    }
}

const fn decoration_icon(kind: DecorationKind) -> &'static str {
    match kind {
        DecorationKind::Tree => "tree",
        DecorationKind::Star => "star",
        DecorationKind::Snowflake => "snowflake",
        DecorationKind::Snow => "snow",
        DecorationKind::Snowman => "snowman",
        DecorationKind::Gift => "gift",
        DecorationKind::Lake => "lake",
        DecorationKind::Park => "park",
    }
}

const fn pickup_icon(kind: PickupKind) -> &'static str {
    match kind {
        PickupKind::Food => "food",
        PickupKind::Water => "water",
        PickupKind::Toy => "toy",
        PickupKind::Wood => "wood",
    }
}

const fn interior_icon(kind: InteriorKind) -> &'static str {
    match kind {
        InteriorKind::Tree => "interior_tree",
        InteriorKind::Star => "interior_star",
        InteriorKind::Gift => "interior_gift",
        InteriorKind::Toy => "interior_toy",
        InteriorKind::Fireplace => "fireplace",
        InteriorKind::Bed => "bed",
        InteriorKind::Table => "table",
        InteriorKind::Lamp => "lamp",
    }
}

const fn species_icon(species: Species) -> &'static str {
    match species {
        Species::Person => "person",
        Species::Dog => "dog",
        Species::Cat => "cat",
        Species::Bird => "bird",
        Species::Rabbit => "rabbit",
        Species::Squirrel => "squirrel",
    }
}

/// People get a stage-specific icon; animals only distinguish babies.
fn living_icon(living: &Living) -> String {
    let species = species_icon(living.species);
    match (living.species, living.stage) {
        (_, LifeStage::Baby) => format!("{species}_baby"),
        (Species::Person, LifeStage::Kid) => format!("{species}_kid"),
        (Species::Person, LifeStage::Teenager) => format!("{species}_teen"),
        (Species::Person, LifeStage::Adult) => format!("{species}_adult"),
        _ => species.to_owned(),
    }
}

const fn bubble(emotion: Emotion) -> Option<&'static str> {
    match emotion {
        Emotion::Content => None,
        Emotion::Happy => Some("Merry Christmas!"),
        Emotion::Hungry => Some("I'm hungry..."),
        Emotion::Thirsty => Some("I'm thirsty..."),
        Emotion::Sleepy => Some("Zzz..."),
        Emotion::Playful => Some("Let's play!"),
        Emotion::Studious => Some("Learning!"),
        Emotion::InLove => Some("<3"),
        Emotion::Proud => Some("Look what I made!"),
    }
}
