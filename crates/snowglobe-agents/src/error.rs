//! Error types for the snowglobe-agents crate.
//!
//! The update pass itself never fails; only loading a behavior config can
//! be rejected.

/// Errors raised while validating behavior parameters.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A chance was outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidProbability {
        /// Name of the offending config field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A distance or speed was negative or not finite.
    #[error("{field} must be a non-negative finite distance, got {value}")]
    InvalidDistance {
        /// Name of the offending config field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A threshold was out of range or inconsistent with another.
    #[error("invalid threshold: {reason}")]
    InvalidThreshold {
        /// Description of the problem.
        reason: String,
    },
}
