//! Simulation clock for the Snowglobe village.
//!
//! The clock is the single source of temporal state: a monotonic tick
//! counter, the simulated year, and the simulated hour of day. Night and
//! school hours are derived from the hour, never stored.
//!
//! All arithmetic is checked or wraps explicitly on the 24-hour day.

use crate::config::TimeConfig;

/// Hours in a simulated day.
const HOURS_PER_DAY: u32 = 24;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid time configuration (e.g. zero hour step).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Clock tracking tick, year, and hour of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    tick: u64,
    year: u64,
    hour: u32,
    years_per_tick: u32,
    hours_per_tick: u32,
    night_start: u32,
    night_end: u32,
    school_start: u32,
    school_end: u32,
}

impl SimulationClock {
    /// Create a clock at tick 0 from a time configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if an hour lies outside the
    /// day, the hour step is zero, or school opens after it closes.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        Self::from_parts(0, config.start_year, config.start_hour, config)
    }

    /// Create a clock at an explicit tick, year, and hour (used when a
    /// saved village is restored).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] under the same conditions as
    /// [`SimulationClock::new`], or if `hour` is not below 24.
    pub fn from_parts(tick: u64, year: u64, hour: u32, config: &TimeConfig) -> Result<Self, ClockError> {
        if config.hours_per_tick == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "hours_per_tick must be at least 1".to_owned(),
            });
        }
        for (name, value) in [
            ("hour", hour),
            ("night_start", config.night_start),
            ("night_end", config.night_end),
            ("school_start", config.school_start),
            ("school_end", config.school_end),
        ] {
            if value >= HOURS_PER_DAY {
                return Err(ClockError::InvalidConfig {
                    reason: format!("{name} must be below {HOURS_PER_DAY}, got {value}"),
                });
            }
        }
        if config.school_start >= config.school_end {
            return Err(ClockError::InvalidConfig {
                reason: "school_start must be before school_end".to_owned(),
            });
        }
        Ok(Self {
            tick,
            year,
            hour,
            years_per_tick: config.years_per_tick,
            hours_per_tick: config.hours_per_tick,
            night_start: config.night_start,
            night_end: config.night_end,
            school_start: config.school_start,
            school_end: config.school_end,
        })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// The year moves forward by `years_per_tick` and the hour by
    /// `hours_per_tick`, wrapping on the day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter or the year
    /// would exceed `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        let tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        let year = self
            .year
            .checked_add(u64::from(self.years_per_tick))
            .ok_or(ClockError::TickOverflow)?;
        let hour = self
            .hour
            .checked_add(self.hours_per_tick)
            .and_then(|h| h.checked_rem(HOURS_PER_DAY))
            .ok_or(ClockError::TickOverflow)?;
        self.tick = tick;
        self.year = year;
        self.hour = hour;
        Ok(tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Return the current simulated year.
    pub const fn year(&self) -> u64 {
        self.year
    }

    /// Return the current hour of day.
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Simulated years that pass per tick.
    pub const fn years_per_tick(&self) -> u32 {
        self.years_per_tick
    }

    /// Whether the current hour falls in the night window.
    ///
    /// The window wraps midnight when `night_start > night_end`.
    pub const fn is_night(&self) -> bool {
        if self.night_start > self.night_end {
            self.hour >= self.night_start || self.hour < self.night_end
        } else {
            self.hour >= self.night_start && self.hour < self.night_end
        }
    }

    /// Whether school is in session. Never true at night.
    pub const fn is_school_hours(&self) -> bool {
        !self.is_night() && self.hour >= self.school_start && self.hour < self.school_end
    }
}
