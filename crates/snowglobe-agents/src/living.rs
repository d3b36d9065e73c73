//! The per-entity step of the update pass.
//!
//! One call runs, in order: aging and meter decay, the death check,
//! life-stage growth, self-care, movement, and proximity interactions.

use rand::Rng;
use snowglobe_types::{EntityBody, EntityId, VillageEvent};
use snowglobe_world::EntityStore;
use tracing::info;

use crate::context::TickContext;
use crate::death::{check_death, drop_carried};
use crate::gathering::interact;
use crate::lifecycle::grow;
use crate::movement::move_living;
use crate::vitals::{apply_vitals, baseline_emotion, self_care};

/// Advance one living entity by one tick.
///
/// A dead entity is removed from the store immediately and its carried
/// resources are appended as pickups where it stood. Back-references to it
/// are left for the reference integrity pass at the end of the tick.
/// Unknown ids and non-living entities are skipped.
pub fn update_living<R: Rng + ?Sized>(
    store: &mut EntityStore,
    id: EntityId,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> Vec<VillageEvent> {
    let config = ctx.config;
    let Some((position, mut living)) = store
        .get(id)
        .and_then(|e| e.as_living().map(|l| (e.position, l.clone())))
    else {
        return Vec::new();
    };
    let mut events = Vec::new();

    apply_vitals(&mut living, config, ctx.years_per_tick);

    if let Some(cause) = check_death(&living, &config.lifespans) {
        store.take(id);
        for pickup in drop_carried(&living, position) {
            store.push(pickup);
        }
        info!(entity = %id, name = %living.name, cause = %cause, age = living.age_years, "villager died");
        events.push(VillageEvent::Died {
            id,
            name: living.name,
            cause,
        });
        return events;
    }

    if let Some(stage) = grow(&mut living, &config.maturity) {
        events.push(VillageEvent::GrewUp {
            id,
            name: living.name.clone(),
            stage,
        });
    }

    living.emotion = baseline_emotion(&living, config, ctx.is_night);
    self_care(&mut living, config);

    let next = move_living(store, position, &mut living, ctx, rng);
    if let Some(entity) = store.get_mut(id) {
        entity.position = next;
        entity.body = EntityBody::Living(living);
    }

    events.extend(interact(store, id, ctx, rng));
    events
}
