//! Per-tick inputs shared by every behavior rule.

use rand::Rng;
use snowglobe_types::Bounds;

use crate::config::BehaviorConfig;

/// Read-only facts about the current tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Behavior parameters.
    pub config: &'a BehaviorConfig,
    /// Extents of the outer world.
    pub bounds: Bounds,
    /// Whether it is night after this tick's clock advance.
    pub is_night: bool,
    /// Whether school is in session after this tick's clock advance.
    pub is_school_hours: bool,
    /// Simulated years added to every age this tick.
    pub years_per_tick: u32,
    /// Total entity cap; new houses are not built beyond it.
    pub max_entities: usize,
    /// Living entity cap; no births beyond it.
    pub max_living: usize,
    /// Interior item cap for toy decorating.
    pub max_interior_items: usize,
}

/// One independent Bernoulli draw.
///
/// Out-of-range chances clamp instead of panicking: anything at or below
/// zero never fires and anything at or above one always fires.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    if chance <= 0.0 {
        return false;
    }
    if chance >= 1.0 {
        return true;
    }
    rng.random::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn certain_and_impossible_rolls() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            assert!(roll(&mut rng, 1.0));
            assert!(!roll(&mut rng, 0.0));
        }
    }
}
