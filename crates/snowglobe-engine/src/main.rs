//! Engine binary for the Snowglobe village.
//!
//! Wires the tick scheduler, the observer server, and the optional
//! archive and studio collaborators around one shared village, then runs
//! until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `snowglobe-config.yaml` (or `SNOWGLOBE_CONFIG`)
//! 3. Seed the random source and build the starting village
//! 4. Connect the village archive when a database is configured
//! 5. Build the content gateway client when a key is configured
//! 6. Start the observer server and the tick scheduler
//! 7. Wait for `Ctrl-C`, then stop the scheduler

mod error;
mod observer_callback;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use snowglobe_core::config::{InfrastructureConfig, SimulationConfig, StudioConfig};
use snowglobe_core::scheduler::TickScheduler;
use snowglobe_core::tick::VillageState;
use snowglobe_db::{FsObjectStore, PgVillageArchive, PostgresPool};
use snowglobe_observer::{AppState, ServerConfig, start_server};
use snowglobe_studio::{GatewayClient, GatewayConfig};
use snowglobe_world::{EntityStore, create_starting_village};
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;

const DEFAULT_CONFIG_PATH: &str = "snowglobe-config.yaml";

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("snowglobe-engine starting");

    let config_path = std::env::var("SNOWGLOBE_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = SimulationConfig::load_or_default(&config_path)?;
    config.validate()?;
    info!(
        path = %config_path.display(),
        village = %config.world.name,
        seed = ?config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        "Configuration loaded"
    );

    let mut rng = config
        .world
        .seed
        .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);

    let store = if config.world.starting_village {
        let (store, ids) =
            create_starting_village(config.world.bounds(), &config.placement, &mut rng)?;
        info!(entities = store.len(), house = %ids.house, "Starting village created");
        store
    } else {
        EntityStore::new()
    };
    let village = Arc::new(RwLock::new(VillageState::new(&config, store)?));

    let mut app_state = AppState::new(Arc::clone(&village), Arc::new(config.clone()));
    if let Some(archive) = connect_archive(&config.infrastructure).await {
        app_state = app_state.with_archive(Arc::new(archive));
    }
    if let Some(studio) = build_studio(&config.studio)? {
        app_state = app_state.with_studio(Arc::new(studio));
    }
    let app_state = Arc::new(app_state);

    let server_config = ServerConfig {
        port: config.infrastructure.observer_port,
        ..ServerConfig::default()
    };
    let observer_state = Arc::clone(&app_state);
    let mut server = tokio::spawn(async move { start_server(&server_config, observer_state).await });

    let mut scheduler = TickScheduler::spawn(
        village,
        rng,
        Duration::from_millis(config.world.tick_interval_ms),
        Box::new(ObserverCallback::new(app_state)),
    )?;

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received");
        }
        served = &mut server => match served {
            Ok(Ok(())) => info!("Observer server exited"),
            Ok(Err(e)) => {
                scheduler.stop();
                return Err(e.into());
            }
            Err(e) => error!(error = %e, "Observer task failed"),
        },
    }

    scheduler.stop();
    server.abort();
    info!("snowglobe-engine shutdown complete");
    Ok(())
}

/// Connect the village archive, or run without one.
///
/// An unreachable database is logged and the engine keeps running; the
/// archive routes then answer `503`.
async fn connect_archive(infra: &InfrastructureConfig) -> Option<PgVillageArchive> {
    if !infra.archive_enabled() {
        info!("No database configured, village archive disabled");
        return None;
    }
    let pool = match PostgresPool::connect(&infra.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "Failed to connect to the archive database, archive disabled");
            return None;
        }
    };
    if let Err(e) = pool.run_migrations().await {
        warn!(error = %e, "Archive migrations failed, archive disabled");
        pool.close().await;
        return None;
    }
    info!(object_store = %infra.object_store_dir, "Village archive connected");
    Some(PgVillageArchive::new(
        pool,
        FsObjectStore::new(&infra.object_store_dir),
    ))
}

/// Build the content gateway client when a key is configured.
fn build_studio(studio: &StudioConfig) -> Result<Option<GatewayClient>, EngineError> {
    if !studio.enabled() {
        info!("No gateway key configured, studio disabled");
        return Ok(None);
    }
    let gateway = GatewayConfig::new(
        &studio.api_url,
        &studio.api_key,
        &studio.text_model,
        &studio.image_model,
    )
    .with_timeout(Duration::from_millis(studio.request_timeout_ms));
    let client = GatewayClient::new(gateway)?;
    info!(api_url = %studio.api_url, "Studio gateway configured");
    Ok(Some(client))
}
