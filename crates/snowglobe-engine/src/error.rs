//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop startup so `main`
//! can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: snowglobe_core::config::ConfigError,
    },

    /// The simulation clock rejected the time configuration.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: snowglobe_core::clock::ClockError,
    },

    /// The starting village did not fit the placement caps.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: snowglobe_world::WorldError,
    },

    /// The tick scheduler could not start.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: snowglobe_core::scheduler::SchedulerError,
    },

    /// The archive database could not be reached or migrated.
    #[error("archive error: {source}")]
    Archive {
        /// The underlying storage error.
        #[from]
        source: snowglobe_db::DbError,
    },

    /// The content gateway client could not be built.
    #[error("studio error: {source}")]
    Studio {
        /// The underlying gateway error.
        #[from]
        source: snowglobe_studio::StudioError,
    },

    /// The observer server failed.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: snowglobe_observer::ServerError,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {0}")]
    Signal(#[from] std::io::Error),
}
