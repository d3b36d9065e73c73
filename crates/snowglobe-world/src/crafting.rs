//! Decoration crafting: three close snowflakes become snow, three close
//! snow piles become a snowman.
//!
//! Groups are formed from a snapshot of the list taken before any merge,
//! so an item created this tick is never consumed in the same tick. Seeds
//! are visited in list order; each seed claims its two nearest unclaimed
//! neighbors of the same kind within the merge distance. An item belongs
//! to at most one group, and the first seed to claim it wins.

use std::collections::BTreeSet;

use snowglobe_types::{DecorationKind, EntityId, Position, VillageEntity};
use tracing::debug;

use crate::geometry::centroid;
use crate::store::EntityStore;

/// Items consumed by one merge.
pub const MERGE_GROUP_SIZE: usize = 3;

/// One completed merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    /// Kind of the consumed items.
    pub from: DecorationKind,
    /// Kind of the produced item.
    pub into: DecorationKind,
    /// Ids of the consumed items.
    pub consumed: Vec<EntityId>,
    /// Id of the produced item.
    pub produced: EntityId,
    /// Where the produced item was placed.
    pub position: Position,
}

/// Merge clusters of craftable decorations in place.
///
/// Consumed items are removed and the produced items are appended at the
/// end of the list, at the centroid of their group.
pub fn craft_decorations(store: &mut EntityStore, merge_distance: f32) -> Vec<Merge> {
    let candidates: Vec<(EntityId, DecorationKind, Position)> = store
        .iter()
        .filter_map(|e| {
            let kind = e.decoration_kind()?;
            kind.next_tier().map(|_| (e.id, kind, e.position))
        })
        .collect();

    let mut claimed: BTreeSet<EntityId> = BTreeSet::new();
    let mut merges = Vec::new();

    for &(seed_id, kind, seed_pos) in &candidates {
        if claimed.contains(&seed_id) {
            continue;
        }
        let mut neighbors: Vec<(EntityId, Position, f32)> = candidates
            .iter()
            .filter(|(id, k, _)| *id != seed_id && *k == kind && !claimed.contains(id))
            .map(|&(id, _, pos)| (id, pos, seed_pos.distance_to(pos)))
            .filter(|(_, _, d)| *d <= merge_distance)
            .collect();
        if neighbors.len() < MERGE_GROUP_SIZE.saturating_sub(1) {
            continue;
        }
        neighbors.sort_by(|a, b| a.2.total_cmp(&b.2));
        neighbors.truncate(MERGE_GROUP_SIZE.saturating_sub(1));

        let Some(into) = kind.next_tier() else {
            continue;
        };
        let mut points = vec![seed_pos];
        points.extend(neighbors.iter().map(|(_, p, _)| *p));
        let Some(position) = centroid(&points) else {
            continue;
        };

        let mut consumed = vec![seed_id];
        consumed.extend(neighbors.iter().map(|(id, _, _)| *id));
        claimed.extend(consumed.iter().copied());

        merges.push(Merge {
            from: kind,
            into,
            consumed,
            produced: EntityId::new(),
            position,
        });
    }

    if merges.is_empty() {
        return merges;
    }

    store.take_all(&claimed);
    for merge in &merges {
        let mut produced = VillageEntity::decoration(merge.into, merge.position);
        produced.id = merge.produced;
        store.push(produced);
        debug!(from = ?merge.from, into = ?merge.into, "decorations merged");
    }
    merges
}
