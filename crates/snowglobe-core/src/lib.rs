//! Simulation clock, tick cycle, and scheduling for the Snowglobe village.
//!
//! This crate owns the ordered update pass that turns one generation of the
//! village into the next, and the fixed-interval task that drives it.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter, simulated year, and hour of day with
//!   night and school-hour derivation.
//! - [`config`] -- Configuration loading from `snowglobe-config.yaml` into
//!   strongly-typed structs.
//! - [`render`] -- Outer and interior view payloads for the front end.
//! - [`scheduler`] -- [`TickScheduler`] and the [`TickCallback`] hook.
//! - [`tick`] -- [`VillageState`] and the ordered update pass.
//!
//! [`TickScheduler`]: scheduler::TickScheduler
//! [`TickCallback`]: scheduler::TickCallback
//! [`VillageState`]: tick::VillageState

pub mod clock;
pub mod config;
pub mod render;
pub mod scheduler;
pub mod tick;
