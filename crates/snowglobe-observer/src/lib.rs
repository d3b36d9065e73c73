//! Observer and editing API for the Snowglobe village.
//!
//! An Axum server over the live [`SharedVillage`]:
//!
//! - **`WebSocket`** (`/ws/ticks`) streams a [`TickBroadcast`] per tick
//!   through a [`tokio::sync::broadcast`] channel
//! - **REST** renders the village and its interiors, applies palette edits
//!   under the placement caps, and fronts the archive and the studio
//! - **`GET /`** is a small HTML status page
//!
//! Edits take the village write lock, so they serialize with the tick
//! scheduler. The archive and studio are optional; routes that need a
//! missing one answer `503`.
//!
//! [`SharedVillage`]: snowglobe_core::scheduler::SharedVillage

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, TickBroadcast};
