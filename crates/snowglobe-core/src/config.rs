//! Configuration loading and typed config structures for the Snowglobe village.
//!
//! The canonical configuration lives in `snowglobe-config.yaml` at the
//! project root. Every section and field has a default, so a missing file or
//! a partial one still yields a runnable village.

use std::path::Path;

use serde::Deserialize;
use snowglobe_agents::{AgentError, BehaviorConfig};
use snowglobe_types::Bounds;
use snowglobe_world::PlacementRules;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Behavior parameters failed validation.
    #[error("invalid behavior config: {source}")]
    Behavior {
        /// The underlying validation error.
        #[from]
        source: AgentError,
    },

    /// A world or time value is unusable.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `snowglobe-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, canvas, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Simulated calendar and day cycle.
    #[serde(default)]
    pub time: TimeConfig,

    /// Living-entity behavior parameters.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Placement caps.
    #[serde(default)]
    pub placement: PlacementRules,

    /// Infrastructure connection settings.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Generative content gateway settings.
    #[serde(default)]
    pub studio: StudioConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DATABASE_URL` overrides `infrastructure.database_url`
    /// - `OBJECT_STORE_DIR` overrides `infrastructure.object_store_dir`
    /// - `GATEWAY_API_URL` overrides `studio.api_url`
    /// - `GATEWAY_API_KEY` overrides `studio.api_key`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    ///
    /// Environment overrides are applied either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.infrastructure.apply_env_overrides();
        self.studio.apply_env_overrides();
    }

    /// Check every section for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unusable world or time values
    /// and [`ConfigError::Behavior`] for invalid behavior parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if !(self.world.width > 0.0 && self.world.height > 0.0) {
            return Err(ConfigError::Invalid {
                reason: "world.width and world.height must be positive".to_owned(),
            });
        }
        self.time.validate()?;
        self.behavior.validate()?;
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable village name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed. When absent the engine seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: f32,

    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: f32,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Whether to seed the starting village when no saved one is loaded.
    #[serde(default = "default_true")]
    pub starting_village: bool,
}

impl WorldConfig {
    /// The canvas as placement bounds.
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: None,
            width: default_width(),
            height: default_height(),
            tick_interval_ms: default_tick_interval_ms(),
            starting_village: true,
        }
    }
}

/// Simulated calendar and day cycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Simulated year a fresh village starts in.
    #[serde(default = "default_start_year")]
    pub start_year: u64,
    /// Hour of day a fresh village starts at.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Simulated years per tick.
    #[serde(default = "default_years_per_tick")]
    pub years_per_tick: u32,
    /// Simulated hours per tick.
    #[serde(default = "default_hours_per_tick")]
    pub hours_per_tick: u32,
    /// Night begins at this hour.
    #[serde(default = "default_night_start")]
    pub night_start: u32,
    /// Night ends at this hour.
    #[serde(default = "default_night_end")]
    pub night_end: u32,
    /// School opens at this hour.
    #[serde(default = "default_school_start")]
    pub school_start: u32,
    /// School closes at this hour.
    #[serde(default = "default_school_end")]
    pub school_end: u32,
}

impl TimeConfig {
    /// Check that hours lie within a day and the steps are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hours_per_tick == 0 {
            return Err(ConfigError::Invalid {
                reason: "time.hours_per_tick must be at least 1".to_owned(),
            });
        }
        for (field, hour) in [
            ("start_hour", self.start_hour),
            ("night_start", self.night_start),
            ("night_end", self.night_end),
            ("school_start", self.school_start),
            ("school_end", self.school_end),
        ] {
            if hour >= 24 {
                return Err(ConfigError::Invalid {
                    reason: format!("time.{field} must be below 24, got {hour}"),
                });
            }
        }
        if self.school_start >= self.school_end {
            return Err(ConfigError::Invalid {
                reason: "time.school_start must be before time.school_end".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            start_hour: default_start_hour(),
            years_per_tick: default_years_per_tick(),
            hours_per_tick: default_hours_per_tick(),
            night_start: default_night_start(),
            night_end: default_night_end(),
            school_start: default_school_start(),
            school_end: default_school_end(),
        }
    }
}

/// Infrastructure connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// `PostgreSQL` connection string. Empty disables the village archive.
    #[serde(default)]
    pub database_url: String,

    /// Directory where snapshot images are written.
    #[serde(default = "default_object_store_dir")]
    pub object_store_dir: String,

    /// Observer HTTP port.
    #[serde(default = "default_observer_port")]
    pub observer_port: u16,
}

impl InfrastructureConfig {
    /// Override connection settings with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DATABASE_URL") {
            self.database_url = val;
        }
        if let Ok(val) = std::env::var("OBJECT_STORE_DIR") {
            self.object_store_dir = val;
        }
    }

    /// Whether a database is configured.
    pub const fn archive_enabled(&self) -> bool {
        !self.database_url.is_empty()
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            object_store_dir: default_object_store_dir(),
            observer_port: default_observer_port(),
        }
    }
}

/// Generative content gateway settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudioConfig {
    /// Base URL of the `OpenAI`-compatible gateway.
    #[serde(default = "default_gateway_url")]
    pub api_url: String,

    /// Bearer token. Empty disables content generation.
    #[serde(default)]
    pub api_key: String,

    /// Model used for songs.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for drawings and video frames.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl StudioConfig {
    /// Override gateway settings with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GATEWAY_API_URL") {
            self.api_url = val;
        }
        if let Ok(val) = std::env::var("GATEWAY_API_KEY") {
            self.api_key = val;
        }
    }

    /// Whether a gateway key is configured.
    pub const fn enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_url: default_gateway_url(),
            api_key: String::new(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Snowglobe Village".to_owned()
}

const fn default_width() -> f32 {
    800.0
}

const fn default_height() -> f32 {
    500.0
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

const fn default_true() -> bool {
    true
}

const fn default_start_year() -> u64 {
    2024
}

const fn default_start_hour() -> u32 {
    8
}

const fn default_years_per_tick() -> u32 {
    1
}

const fn default_hours_per_tick() -> u32 {
    3
}

const fn default_night_start() -> u32 {
    20
}

const fn default_night_end() -> u32 {
    6
}

const fn default_school_start() -> u32 {
    8
}

const fn default_school_end() -> u32 {
    15
}

fn default_object_store_dir() -> String {
    "data/snapshots".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_gateway_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_owned()
}

fn default_text_model() -> String {
    "google/gemini-2.5-flash".to_owned()
}

fn default_image_model() -> String {
    "google/gemini-2.5-flash-image-preview".to_owned()
}

const fn default_request_timeout_ms() -> u64 {
    60_000
}
