//! Tick callback that streams summaries to observer clients.

use std::sync::Arc;

use snowglobe_core::scheduler::TickCallback;
use snowglobe_core::tick::{TickSummary, VillageState};
use snowglobe_observer::state::{AppState, TickBroadcast};
use tracing::debug;

/// Bridges the tick scheduler to the observer's broadcast channel.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a callback publishing through `state`.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl TickCallback for ObserverCallback {
    fn on_tick(&mut self, summary: &TickSummary, _state: &VillageState) {
        let receivers = self.state.broadcast(&TickBroadcast::from(summary));
        debug!(tick = summary.tick, receivers, "Tick broadcast sent");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use snowglobe_core::config::SimulationConfig;
    use snowglobe_world::EntityStore;
    use tokio::sync::RwLock;

    use super::*;

    #[tokio::test]
    async fn each_tick_reaches_subscribers() {
        let config = SimulationConfig::default();
        let village = VillageState::new(&config, EntityStore::new()).unwrap();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        let (next, summary) = snowglobe_core::tick::advance(&village, &mut rng).unwrap();

        let state = Arc::new(AppState::new(
            Arc::new(RwLock::new(village)),
            Arc::new(config),
        ));
        let mut rx = state.subscribe();
        let mut callback = ObserverCallback::new(Arc::clone(&state));
        callback.on_tick(&summary, &next);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.tick, 1);
        assert_eq!(received.population, 0);
    }
}
