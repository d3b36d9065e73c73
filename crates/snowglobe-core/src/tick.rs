//! The village update pass: one pure step from one generation to the next.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Clock** -- advance tick, year, and hour.
//! 2. **Living** -- for each living entity in list order: vitals, death,
//!    growth, self-care, movement, and proximity interactions.
//! 3. **Breeding** -- all-pairs scan for offspring.
//! 4. **Marriage** -- all-pairs scan for new couples. Shares the pair lock
//!    with breeding, so nobody takes part in two pair events in one tick.
//! 5. **Crafting** -- merge clusters of snowflakes and snow.
//! 6. **Integrity** -- drop references to removed entities.
//! 7. **Summary** -- counts and events for observers.
//!
//! Randomness comes from the caller, so a seeded generator replays a
//! village exactly.

use rand::Rng;
use serde::Serialize;
use snowglobe_agents::{BehaviorConfig, PairLock, TickContext, breeding_pass, marriage_pass, update_living};
use snowglobe_types::{Bounds, VillageEntity, VillageEvent, VillageSnapshot};
use snowglobe_world::{EntityStore, PlacementRules, craft_decorations};
use tracing::{debug, info};

use crate::clock::{ClockError, SimulationClock};
use crate::config::SimulationConfig;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated year after the tick.
    pub year: u64,
    /// Hour of day after the tick.
    pub hour: u32,
    /// Whether it is night after the tick.
    pub is_night: bool,
    /// Living entities at the end of the tick.
    pub population: u32,
    /// Babies born this tick.
    pub births: u32,
    /// Living entities removed by death this tick.
    pub deaths: u32,
    /// New couples this tick.
    pub marriages: u32,
    /// Decoration merges this tick.
    pub merges: u32,
    /// Houses built this tick.
    pub built: u32,
    /// Everything notable that happened, in order.
    pub events: Vec<VillageEvent>,
}

/// One generation of the village.
///
/// The tick pass never mutates a state in place: it clones the previous
/// generation and returns the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct VillageState {
    /// The simulation clock.
    pub clock: SimulationClock,
    /// Every entity in the village, in list order.
    pub store: EntityStore,
    /// Extents of the outer world.
    pub bounds: Bounds,
    /// Simulated year the village started in.
    pub start_year: u64,
    /// Behavior parameters.
    pub behavior: BehaviorConfig,
    /// Placement caps.
    pub placement: PlacementRules,
}

impl VillageState {
    /// Create a fresh village at tick 0 around the given entities.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError`] if the time configuration is invalid.
    pub fn new(config: &SimulationConfig, store: EntityStore) -> Result<Self, ClockError> {
        let clock = SimulationClock::new(&config.time)?;
        Ok(Self {
            start_year: clock.year(),
            clock,
            store,
            bounds: config.world.bounds(),
            behavior: config.behavior.clone(),
            placement: config.placement.clone(),
        })
    }

    /// Resume a saved village.
    ///
    /// The clock restarts at tick 0 in the saved year at the configured
    /// start hour. Dangling references in the saved entity list are
    /// repaired before the village runs.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError`] if the time configuration is invalid.
    pub fn from_snapshot(snapshot: &VillageSnapshot, config: &SimulationConfig) -> Result<Self, ClockError> {
        let clock = SimulationClock::from_parts(0, snapshot.current_year, config.time.start_hour, &config.time)?;
        let mut store = EntityStore::from_entities(snapshot.entities.clone());
        let report = store.repair_references();
        info!(
            title = %snapshot.title,
            entities = store.len(),
            year = snapshot.current_year,
            evicted = report.evicted,
            widowed = report.widowed,
            "Village restored from snapshot"
        );
        Ok(Self {
            clock,
            store,
            bounds: config.world.bounds(),
            start_year: snapshot.start_year,
            behavior: config.behavior.clone(),
            placement: config.placement.clone(),
        })
    }

    /// Copy the village into a snapshot with the given title.
    pub fn to_snapshot(&self, title: &str) -> VillageSnapshot {
        VillageSnapshot {
            title: title.to_owned(),
            start_year: self.start_year,
            current_year: self.clock.year(),
            entities: self.store.entities().to_vec(),
        }
    }

    /// Every entity, in list order.
    pub fn entities(&self) -> &[VillageEntity] {
        self.store.entities()
    }

    const fn context(&self) -> TickContext<'_> {
        TickContext {
            config: &self.behavior,
            bounds: self.bounds,
            is_night: self.clock.is_night(),
            is_school_hours: self.clock.is_school_hours(),
            years_per_tick: self.clock.years_per_tick(),
            max_entities: self.placement.max_entities,
            max_living: self.placement.max_living,
            max_interior_items: self.placement.max_interior_items,
        }
    }
}

/// Execute one complete tick and return the next generation.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the clock cannot advance. The previous
/// generation is untouched in that case.
pub fn advance<R: Rng + ?Sized>(
    previous: &VillageState,
    rng: &mut R,
) -> Result<(VillageState, TickSummary), TickError> {
    let mut state = previous.clone();

    // --- Phase 1: Clock ---
    let tick = state.clock.advance()?;
    debug!(tick, year = state.clock.year(), hour = state.clock.hour(), "Tick started");

    let mut store = std::mem::take(&mut state.store);
    let ctx = state.context();
    let mut events = Vec::new();

    // --- Phase 2: Living ---
    for id in store.living_ids() {
        events.extend(update_living(&mut store, id, &ctx, rng));
    }

    // --- Phases 3 and 4: Pairs ---
    let mut lock = PairLock::new();
    events.extend(breeding_pass(&mut store, &mut lock, &ctx, rng));
    events.extend(marriage_pass(&mut store, &mut lock, &ctx, rng));

    // --- Phase 5: Crafting ---
    for merge in craft_decorations(&mut store, ctx.config.merge_distance) {
        events.push(VillageEvent::Merged {
            into: merge.into,
            position: merge.position,
        });
    }

    // --- Phase 6: Integrity ---
    let report = store.repair_references();
    if report.evicted > 0 || report.widowed > 0 {
        debug!(tick, evicted = report.evicted, widowed = report.widowed, "References repaired");
    }
    state.store = store;

    // --- Phase 7: Summary ---
    let summary = summarize(&state, events);
    info!(
        tick,
        year = summary.year,
        population = summary.population,
        births = summary.births,
        deaths = summary.deaths,
        marriages = summary.marriages,
        merges = summary.merges,
        "Tick complete"
    );
    Ok((state, summary))
}

fn summarize(state: &VillageState, events: Vec<VillageEvent>) -> TickSummary {
    let count = |pred: fn(&VillageEvent) -> bool| {
        u32::try_from(events.iter().filter(|e| pred(e)).count()).unwrap_or(u32::MAX)
    };
    TickSummary {
        tick: state.clock.tick(),
        year: state.clock.year(),
        hour: state.clock.hour(),
        is_night: state.clock.is_night(),
        population: u32::try_from(state.store.living_count()).unwrap_or(u32::MAX),
        births: count(|e| matches!(e, VillageEvent::Born { .. })),
        deaths: count(|e| matches!(e, VillageEvent::Died { .. })),
        marriages: count(|e| matches!(e, VillageEvent::Married { .. })),
        merges: count(|e| matches!(e, VillageEvent::Merged { .. })),
        built: count(|e| matches!(e, VillageEvent::Built { .. })),
        events,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use snowglobe_types::{
        DecorationKind, Gender, LifeStage, Living, Position, Species, VillageEntity, Whereabouts,
    };
    use snowglobe_world::create_starting_village;

    use super::*;

    fn state_with(entities: Vec<VillageEntity>, config: &SimulationConfig) -> VillageState {
        VillageState::new(config, EntityStore::from_entities(entities)).unwrap()
    }

    fn person(name: &str, gender: Gender, stage: LifeStage, age: u32, at: Position) -> VillageEntity {
        VillageEntity::living(Living::new(name.into(), Species::Person, gender, stage, age), at)
    }

    #[test]
    fn meters_stay_in_range_across_ticks() {
        let config = SimulationConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let (store, _) = create_starting_village(config.world.bounds(), &config.placement, &mut rng).unwrap();
        let mut state = VillageState::new(&config, store).unwrap();
        for _ in 0..30 {
            let (next, _) = advance(&state, &mut rng).unwrap();
            for living in next.entities().iter().filter_map(VillageEntity::as_living) {
                assert!(living.hunger <= 100);
                assert!(living.thirst <= 100);
            }
            state = next;
        }
    }

    #[test]
    fn starving_entity_is_gone_the_same_tick() {
        let config = SimulationConfig::default();
        let mut hungry = person("Otto", Gender::Male, LifeStage::Adult, 30, Position::new(100.0, 100.0));
        if let Some(l) = hungry.as_living_mut() {
            l.hunger = 1;
        }
        let id = hungry.id;
        let state = state_with(vec![hungry], &config);

        let (next, summary) = advance(&state, &mut SmallRng::seed_from_u64(1)).unwrap();
        assert!(next.store.get(id).is_none());
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.population, 0);
    }

    #[test]
    fn kid_becomes_teenager_exactly_once() {
        let config = SimulationConfig::default();
        let kid = person("Pip", Gender::Female, LifeStage::Kid, 12, Position::new(100.0, 100.0));
        let id = kid.id;
        let mut state = state_with(vec![kid], &config);
        let mut rng = SmallRng::seed_from_u64(2);

        let mut teen_events = 0;
        for _ in 0..4 {
            let (next, summary) = advance(&state, &mut rng).unwrap();
            teen_events += summary
                .events
                .iter()
                .filter(|e| matches!(e, VillageEvent::GrewUp { id: who, stage: LifeStage::Teenager, .. } if *who == id))
                .count();
            state = next;
        }
        assert_eq!(teen_events, 1);
        let living = state.store.get(id).unwrap().as_living().unwrap();
        assert_eq!(living.stage, LifeStage::Teenager);
    }

    #[test]
    fn marriage_is_always_symmetric() {
        let mut config = SimulationConfig::default();
        config.behavior.hunger_decay = 0;
        config.behavior.thirst_decay = 0;
        config.behavior.wander_step = 0.0;
        config.behavior.breed_chance = 0.0;
        config.behavior.marry_chance = 0.5;
        let at = Position::new(200.0, 200.0);
        let a = person("Holly", Gender::Female, LifeStage::Adult, 25, at);
        let b = person("Ivan", Gender::Male, LifeStage::Adult, 27, at);
        let (a_id, b_id) = (a.id, b.id);
        let mut state = state_with(vec![a, b], &config);
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..40 {
            let (next, _) = advance(&state, &mut rng).unwrap();
            state = next;
            let la = state.store.get(a_id).unwrap().as_living().unwrap();
            let lb = state.store.get(b_id).unwrap().as_living().unwrap();
            assert_eq!(la.is_married(), lb.is_married());
            assert_eq!(la.family, lb.family);
            if la.is_married() {
                assert!(la.family.is_some());
                assert_eq!(la.spouse, Some(b_id));
                assert_eq!(lb.spouse, Some(a_id));
            }
        }

        let la = state.store.get(a_id).unwrap().as_living().unwrap();
        let lb = state.store.get(b_id).unwrap().as_living().unwrap();
        assert!(la.is_married() && lb.is_married());
        assert!(la.family.is_some());
        assert_eq!(la.family, lb.family);
    }

    #[test]
    fn three_close_snowflakes_become_one_snow_at_centroid() {
        let config = SimulationConfig::default();
        let flakes = vec![
            VillageEntity::decoration(DecorationKind::Snowflake, Position::new(100.0, 100.0)),
            VillageEntity::decoration(DecorationKind::Snowflake, Position::new(110.0, 100.0)),
            VillageEntity::decoration(DecorationKind::Snowflake, Position::new(105.0, 109.0)),
        ];
        let state = state_with(flakes, &config);

        let (next, summary) = advance(&state, &mut SmallRng::seed_from_u64(4)).unwrap();
        assert_eq!(summary.merges, 1);
        assert_eq!(next.store.len(), 1);
        let snow = next.entities().first().unwrap();
        assert_eq!(snow.decoration_kind(), Some(DecorationKind::Snow));
        assert!(snow.position.distance_to(Position::new(105.0, 103.0)) < 1e-3);
    }

    #[test]
    fn same_seed_replays_the_same_village() {
        let config = SimulationConfig::default();
        let (store, _) =
            create_starting_village(config.world.bounds(), &config.placement, &mut SmallRng::seed_from_u64(5)).unwrap();
        let start = VillageState::new(&config, store).unwrap();

        let run = |seed: u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut state = start.clone();
            let mut trace = Vec::new();
            for _ in 0..15 {
                let (next, summary) = advance(&state, &mut rng).unwrap();
                trace.push((summary.population, summary.births, summary.deaths, summary.events.len()));
                state = next;
            }
            let positions: Vec<(f32, f32)> = state.entities().iter().map(|e| (e.position.x, e.position.y)).collect();
            (trace, positions)
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn previous_generation_is_untouched() {
        let config = SimulationConfig::default();
        let kid = person("Tilly", Gender::Female, LifeStage::Kid, 5, Position::new(50.0, 50.0));
        let state = state_with(vec![kid], &config);
        let before = state.clone();
        let (next, _) = advance(&state, &mut SmallRng::seed_from_u64(6)).unwrap();
        assert_eq!(state, before);
        assert_eq!(next.clock.tick(), 1);
        assert_eq!(next.clock.year(), state.clock.year() + 1);
    }

    #[test]
    fn snapshot_round_trip_keeps_years() {
        let config = SimulationConfig::default();
        let mut state = state_with(
            vec![person("Noel", Gender::Male, LifeStage::Adult, 40, Position::new(10.0, 10.0))],
            &config,
        );
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..3 {
            state = advance(&state, &mut rng).unwrap().0;
        }
        let snapshot = state.to_snapshot("Winter Lane");
        assert_eq!(snapshot.years_elapsed(), 3);

        let restored = VillageState::from_snapshot(&snapshot, &config).unwrap();
        assert_eq!(restored.start_year, state.start_year);
        assert_eq!(restored.clock.year(), state.clock.year());
        assert_eq!(restored.entities(), state.entities());
    }

    #[test]
    fn restore_repairs_dangling_home() {
        let config = SimulationConfig::default();
        let mut resident = person("Ada", Gender::Female, LifeStage::Adult, 30, Position::new(10.0, 10.0));
        if let Some(l) = resident.as_living_mut() {
            l.whereabouts = Whereabouts::Home(snowglobe_types::EntityId::new());
        }
        let snapshot = VillageSnapshot {
            title: "Broken".into(),
            start_year: 2024,
            current_year: 2030,
            entities: vec![resident],
        };
        let restored = VillageState::from_snapshot(&snapshot, &config).unwrap();
        let living = restored.entities().first().and_then(VillageEntity::as_living).unwrap();
        assert!(living.whereabouts.is_outside());
    }
}
