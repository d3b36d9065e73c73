//! Behavior rules for the people and animals of the Snowglobe village.
//!
//! Everything here is a pure function of the entity store, a
//! [`TickContext`], and an injected random source. Scheduling and the
//! order of passes live in `snowglobe-core`.
//!
//! # Modules
//!
//! - [`config`] -- [`BehaviorConfig`]: decay rates, lifespans, distances, chances
//! - [`context`] -- [`TickContext`] and the Bernoulli helper
//! - [`death`] -- Death conditions and dropped resources
//! - [`error`] -- Config validation errors
//! - [`gathering`] -- Proximity interactions with pickups and decorations
//! - [`lifecycle`] -- Life-stage growth
//! - [`living`] -- The ordered per-entity step
//! - [`movement`] -- Target selection and stepping
//! - [`social`] -- Breeding and marriage pair passes
//! - [`vitals`] -- Hunger, thirst, aging, and self-care

pub mod config;
pub mod context;
pub mod death;
pub mod error;
pub mod gathering;
pub mod lifecycle;
pub mod living;
pub mod movement;
pub mod social;
pub mod vitals;

pub use config::{BehaviorConfig, Lifespans, Maturity};
pub use context::{TickContext, roll};
pub use error::AgentError;
pub use living::update_living;
pub use social::{PairLock, breeding_pass, marriage_pass};
