//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the live village, the broadcast channel for tick
//! summaries, and the optional collaborators: the village archive and the
//! content gateway. Reads take the village read lock; edits take the write
//! lock and therefore serialize with the tick scheduler.

use std::sync::Arc;

use snowglobe_core::config::SimulationConfig;
use snowglobe_core::scheduler::SharedVillage;
use snowglobe_core::tick::TickSummary;
use snowglobe_db::PgVillageArchive;
use snowglobe_studio::GatewayClient;
use snowglobe_types::VillageEvent;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel for tick summaries.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable tick summary pushed over the `WebSocket`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickBroadcast {
    /// The tick number.
    pub tick: u64,
    /// Simulated year.
    pub year: u64,
    /// Hour of day.
    pub hour: u32,
    /// Whether it is night.
    pub is_night: bool,
    /// Living entities at the end of the tick.
    pub population: u32,
    /// Babies born this tick.
    pub births: u32,
    /// Deaths this tick.
    pub deaths: u32,
    /// New couples this tick.
    pub marriages: u32,
    /// Decoration merges this tick.
    pub merges: u32,
    /// Houses built this tick.
    pub built: u32,
    /// Notable events, in order.
    pub events: Vec<VillageEvent>,
}

impl From<&TickSummary> for TickBroadcast {
    fn from(summary: &TickSummary) -> Self {
        Self {
            tick: summary.tick,
            year: summary.year,
            hour: summary.hour,
            is_night: summary.is_night,
            population: summary.population,
            births: summary.births,
            deaths: summary.deaths,
            marriages: summary.marriages,
            merges: summary.merges,
            built: summary.built,
            events: summary.events.clone(),
        }
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for tick summary messages.
    pub tx: broadcast::Sender<TickBroadcast>,
    /// The live village.
    pub village: SharedVillage,
    /// Configuration used when restoring saved villages.
    pub config: Arc<SimulationConfig>,
    /// Saved village storage, when a database is configured.
    pub archive: Option<Arc<PgVillageArchive>>,
    /// Content gateway, when a key is configured.
    pub studio: Option<Arc<GatewayClient>>,
}

impl AppState {
    /// Create application state over a live village with no collaborators.
    pub fn new(village: SharedVillage, config: Arc<SimulationConfig>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            village,
            config,
            archive: None,
            studio: None,
        }
    }

    /// Attach the village archive.
    #[must_use]
    pub fn with_archive(mut self, archive: Arc<PgVillageArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Attach the content gateway.
    #[must_use]
    pub fn with_studio(mut self, studio: Arc<GatewayClient>) -> Self {
        self.studio = Some(studio);
        self
    }

    /// Subscribe to the tick broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<TickBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a tick summary to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, summary: &TickBroadcast) -> usize {
        self.tx.send(summary.clone()).unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowglobe_core::tick::VillageState;
    use snowglobe_types::{DeathCause, EntityId};
    use snowglobe_world::EntityStore;
    use tokio::sync::RwLock;

    use super::*;

    fn state() -> AppState {
        let config = SimulationConfig::default();
        let village = VillageState::new(&config, EntityStore::new()).unwrap();
        AppState::new(Arc::new(RwLock::new(village)), Arc::new(config))
    }

    fn summary() -> TickSummary {
        TickSummary {
            tick: 4,
            year: 2028,
            hour: 20,
            is_night: true,
            population: 3,
            births: 0,
            deaths: 1,
            marriages: 0,
            merges: 0,
            built: 0,
            events: vec![VillageEvent::Died {
                id: EntityId::new(),
                name: "Holly".into(),
                cause: DeathCause::Starvation,
            }],
        }
    }

    #[test]
    fn broadcast_without_subscribers_is_not_an_error() {
        let state = state();
        assert_eq!(state.broadcast(&TickBroadcast::from(&summary())), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_each_tick() {
        let state = state();
        let mut rx = state.subscribe();
        let message = TickBroadcast::from(&summary());
        assert_eq!(state.broadcast(&message), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, message);
        assert_eq!(received.deaths, 1);
        assert!(received.is_night);
    }

    #[test]
    fn collaborators_start_absent() {
        let state = state();
        assert!(state.archive.is_none());
        assert!(state.studio.is_none());
    }
}
