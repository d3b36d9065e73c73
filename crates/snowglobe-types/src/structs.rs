//! Core entity structs for the Snowglobe village.
//!
//! A village is an ordered list of [`VillageEntity`] values. Each entity
//! carries an id, a position, and an [`EntityBody`] discriminated by kind.
//! Only the fields relevant to a kind exist on that kind's body.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    DecorationKind, Emotion, Gender, InteriorKind, LifeStage, PickupKind, Species, StructureKind,
};
use crate::ids::{EntityId, FamilyId, InteriorItemId};

/// Maximum value of the hunger and thirst meters.
pub const METER_MAX: u32 = 100;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point on the 2D village plane, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point halfway between two positions.
    #[must_use]
    pub const fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// The extents of a placement surface. Positions are clamped into
/// `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bounds {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
}

impl Bounds {
    /// Create bounds of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a position so it lies inside these bounds.
    pub const fn clamp(self, position: Position) -> Position {
        Position {
            x: position.x.clamp(0.0, self.width.max(0.0)),
            y: position.y.clamp(0.0, self.height.max(0.0)),
        }
    }

    /// Whether a position lies inside these bounds (edges included).
    pub fn contains(self, position: Position) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

// ---------------------------------------------------------------------------
// Living entities
// ---------------------------------------------------------------------------

/// Resources a living entity is carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Carried {
    /// Logs, spent on building houses.
    pub wood: u32,
    /// Food, eaten when hungry.
    pub food: u32,
    /// Water, drunk when thirsty.
    pub water: u32,
    /// Toys, used to decorate house interiors.
    pub toys: u32,
}

impl Carried {
    /// Total number of carried items.
    pub const fn total(&self) -> u32 {
        self.wood
            .saturating_add(self.food)
            .saturating_add(self.water)
            .saturating_add(self.toys)
    }

    /// Whether nothing is being carried.
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero carried quantities as pickup kinds, in a fixed order.
    pub fn as_pickups(&self) -> Vec<(PickupKind, u32)> {
        [
            (PickupKind::Wood, self.wood),
            (PickupKind::Food, self.food),
            (PickupKind::Water, self.water),
            (PickupKind::Toy, self.toys),
        ]
        .into_iter()
        .filter(|(_, qty)| *qty > 0)
        .collect()
    }

    /// Add a quantity of a pickup kind to the carried counts.
    pub const fn add(&mut self, kind: PickupKind, quantity: u32) {
        match kind {
            PickupKind::Wood => self.wood = self.wood.saturating_add(quantity),
            PickupKind::Food => self.food = self.food.saturating_add(quantity),
            PickupKind::Water => self.water = self.water.saturating_add(quantity),
            PickupKind::Toy => self.toys = self.toys.saturating_add(quantity),
        }
    }
}

/// Where a living entity currently is.
///
/// Being inside a house and being at school are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Whereabouts {
    /// Walking around the outer world.
    #[default]
    Outside,
    /// Inside the referenced house.
    Home(EntityId),
    /// Inside the referenced school.
    School(EntityId),
}

impl Whereabouts {
    /// The structure this entity is inside, if any.
    pub const fn structure(self) -> Option<EntityId> {
        match self {
            Self::Outside => None,
            Self::Home(id) | Self::School(id) => Some(id),
        }
    }

    /// Whether the entity is in the outer world.
    pub const fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// State of a person or animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Living {
    /// Display name.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Gender.
    pub gender: Gender,
    /// Current life stage.
    pub stage: LifeStage,
    /// Simulated years lived.
    pub age_years: u32,
    /// Fullness meter: 100 is fully fed, 0 is death by starvation.
    pub hunger: u32,
    /// Hydration meter: 100 is fully hydrated, 0 is death by dehydration.
    pub thirst: u32,
    /// Resources being carried.
    pub carried: Carried,
    /// Outside, at home, or at school.
    pub whereabouts: Whereabouts,
    /// Family this entity belongs to, if any.
    pub family: Option<FamilyId>,
    /// Spouse, if married and the spouse is still alive.
    pub spouse: Option<EntityId>,
    /// Current mood.
    pub emotion: Emotion,
}

impl Living {
    /// Create a living entity with full meters, standing outside.
    pub const fn new(
        name: String,
        species: Species,
        gender: Gender,
        stage: LifeStage,
        age_years: u32,
    ) -> Self {
        Self {
            name,
            species,
            gender,
            stage,
            age_years,
            hunger: METER_MAX,
            thirst: METER_MAX,
            carried: Carried {
                wood: 0,
                food: 0,
                water: 0,
                toys: 0,
            },
            whereabouts: Whereabouts::Outside,
            family: None,
            spouse: None,
            emotion: Emotion::Content,
        }
    }

    /// Whether this entity currently has a living spouse.
    pub const fn is_married(&self) -> bool {
        self.spouse.is_some()
    }

    /// Whether this entity is an adult.
    pub fn is_adult(&self) -> bool {
        self.stage == LifeStage::Adult
    }

    /// The stage this entity grows into next, if any.
    pub const fn growth_target(&self) -> Option<LifeStage> {
        self.stage.growth_target(self.species)
    }
}

// ---------------------------------------------------------------------------
// Structures, decorations, pickups
// ---------------------------------------------------------------------------

/// An item placed inside a structure's interior surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteriorItem {
    /// Item id, unique within the village.
    pub id: InteriorItemId,
    /// What the item is.
    pub kind: InteriorKind,
    /// Position on the interior surface.
    pub position: Position,
}

/// A building with a nested interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Structure {
    /// House, school, or church.
    pub kind: StructureKind,
    /// Items placed inside.
    pub interior: Vec<InteriorItem>,
}

/// A decorative item or landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Decoration {
    /// What the decoration is.
    pub kind: DecorationKind,
}

/// A resource lying on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pickup {
    /// What the resource is.
    pub kind: PickupKind,
    /// How many units lie here.
    pub quantity: u32,
}

/// Kind-specific payload of a [`VillageEntity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "entity", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EntityBody {
    /// A building.
    Structure(Structure),
    /// A decoration or landmark.
    Decoration(Decoration),
    /// A resource on the ground.
    Pickup(Pickup),
    /// A person or animal.
    Living(Living),
}

/// Anything placed in the village world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VillageEntity {
    /// Unique id.
    pub id: EntityId,
    /// Position in the outer world.
    pub position: Position,
    /// Kind-specific payload.
    pub body: EntityBody,
}

impl VillageEntity {
    /// Create an entity with a fresh id.
    pub fn new(position: Position, body: EntityBody) -> Self {
        Self {
            id: EntityId::new(),
            position,
            body,
        }
    }

    /// Create a structure with an empty interior.
    pub fn structure(kind: StructureKind, position: Position) -> Self {
        Self::new(
            position,
            EntityBody::Structure(Structure {
                kind,
                interior: Vec::new(),
            }),
        )
    }

    /// Create a decoration.
    pub fn decoration(kind: DecorationKind, position: Position) -> Self {
        Self::new(position, EntityBody::Decoration(Decoration { kind }))
    }

    /// Create a pickup.
    pub fn pickup(kind: PickupKind, quantity: u32, position: Position) -> Self {
        Self::new(position, EntityBody::Pickup(Pickup { kind, quantity }))
    }

    /// Create a living entity.
    pub fn living(living: Living, position: Position) -> Self {
        Self::new(position, EntityBody::Living(living))
    }

    /// The living payload, if this is a person or animal.
    pub const fn as_living(&self) -> Option<&Living> {
        match &self.body {
            EntityBody::Living(living) => Some(living),
            _ => None,
        }
    }

    /// Mutable access to the living payload.
    pub const fn as_living_mut(&mut self) -> Option<&mut Living> {
        match &mut self.body {
            EntityBody::Living(living) => Some(living),
            _ => None,
        }
    }

    /// The structure payload, if this is a building.
    pub const fn as_structure(&self) -> Option<&Structure> {
        match &self.body {
            EntityBody::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    /// Mutable access to the structure payload.
    pub const fn as_structure_mut(&mut self) -> Option<&mut Structure> {
        match &mut self.body {
            EntityBody::Structure(structure) => Some(structure),
            _ => None,
        }
    }

    /// The structure kind, if this is a building.
    pub const fn structure_kind(&self) -> Option<StructureKind> {
        match &self.body {
            EntityBody::Structure(structure) => Some(structure.kind),
            _ => None,
        }
    }

    /// The decoration kind, if this is a decoration.
    pub const fn decoration_kind(&self) -> Option<DecorationKind> {
        match &self.body {
            EntityBody::Decoration(decoration) => Some(decoration.kind),
            _ => None,
        }
    }

    /// The pickup payload, if this is a resource on the ground.
    pub const fn as_pickup(&self) -> Option<Pickup> {
        match &self.body {
            EntityBody::Pickup(pickup) => Some(*pickup),
            _ => None,
        }
    }

    /// Whether this is a person or animal.
    pub const fn is_living(&self) -> bool {
        matches!(self.body, EntityBody::Living(_))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_clamp_pulls_points_inside() {
        let bounds = Bounds::new(100.0, 50.0);
        let clamped = bounds.clamp(Position::new(-10.0, 80.0));
        assert_eq!(clamped, Position::new(0.0, 50.0));
        assert!(bounds.contains(clamped));
    }

    #[test]
    fn carried_pickups_skip_empty_counts() {
        let carried = Carried {
            wood: 2,
            food: 0,
            water: 1,
            toys: 0,
        };
        assert_eq!(
            carried.as_pickups(),
            vec![(PickupKind::Wood, 2), (PickupKind::Water, 1)]
        );
    }

    #[test]
    fn new_living_starts_full_and_outside() {
        let living = Living::new(
            String::from("Holly"),
            Species::Person,
            Gender::Female,
            LifeStage::Adult,
            30,
        );
        assert_eq!(living.hunger, METER_MAX);
        assert_eq!(living.thirst, METER_MAX);
        assert!(living.whereabouts.is_outside());
        assert!(!living.is_married());
    }

    #[test]
    fn entity_body_serializes_with_tag() {
        let entity = VillageEntity::decoration(DecorationKind::Star, Position::new(1.0, 2.0));
        let json = serde_json::to_value(&entity).ok();
        let tag = json
            .as_ref()
            .and_then(|v| v.get("body"))
            .and_then(|b| b.get("entity"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(tag, Some("decoration"));
    }
}
