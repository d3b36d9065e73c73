//! Error types for the `snowglobe-world` crate.
//!
//! Placement rejections render as the notice shown to the user, so the
//! `Display` text of each variant is written for a person, not a log.

use snowglobe_types::{EntityId, InteriorItemId, PaletteItem};

/// Errors that can occur while editing the village.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The per-kind cap for a palette item has been reached.
    #[error("Maximum of {cap} {}s reached!", item.label())]
    CapReached {
        /// The item that was rejected.
        item: PaletteItem,
        /// The configured cap for that item.
        cap: usize,
    },

    /// The village holds as many entities as it is allowed to.
    #[error("The village is full ({cap} items). Remove something first!")]
    VillageFull {
        /// The total entity cap.
        cap: usize,
    },

    /// The village holds as many people and animals as it is allowed to.
    #[error("The village is crowded ({cap} residents). Remove someone first!")]
    TooManyResidents {
        /// The living entity cap.
        cap: usize,
    },

    /// No entity with the given id exists.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The entity exists but is not a structure.
    #[error("entity {0} is not a structure")]
    NotAStructure(EntityId),

    /// No interior item with the given id exists inside the structure.
    #[error("item {item} not found inside structure {structure}")]
    InteriorItemNotFound {
        /// The structure that was searched.
        structure: EntityId,
        /// The missing item.
        item: InteriorItemId,
    },

    /// The structure interior holds as many items as it is allowed to.
    #[error("This building is full ({cap} items)!")]
    InteriorFull {
        /// The interior item cap.
        cap: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_notice_names_the_item() {
        let err = WorldError::CapReached {
            item: PaletteItem::Tree,
            cap: 10,
        };
        assert_eq!(err.to_string(), "Maximum of 10 Trees reached!");
    }
}
