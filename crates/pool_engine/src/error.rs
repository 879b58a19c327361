//! Configuration validation errors shared by the pool and the spawner

use thiserror::Error;

/// Invalid parameters supplied to a pool or a shower
///
/// Raised by the call that introduced the bad value. Values are never clamped;
/// the caller has to fix the configuration and retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Pool warm-up size larger than its cap
    #[error("initial size {initial} exceeds max size {max}")]
    InitialExceedsMax {
        /// Requested warm-up size
        initial: usize,
        /// Requested cap
        max: usize,
    },

    /// Pool cap of zero
    #[error("max size must be at least 1")]
    ZeroCapacity,

    /// Pool cap beyond what a handle index can address
    #[error("max size {max} exceeds the handle index range")]
    CapacityTooLarge {
        /// Requested cap
        max: usize,
    },

    /// Shrink high-water mark outside `initial..=max`
    #[error("shrink high-water mark {mark} must lie between initial size {initial} and max size {max}")]
    InvalidShrinkMark {
        /// Requested high-water mark
        mark: usize,
        /// Pool warm-up size
        initial: usize,
        /// Pool cap
        max: usize,
    },

    /// Range whose lower bound is above its upper bound
    #[error("{name}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Parameter name
        name: &'static str,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },

    /// Negative duration, size or speed
    #[error("{name} must not be negative (got {value})")]
    NegativeValue {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// NaN or infinite value
    #[error("{name} must be finite")]
    NonFinite {
        /// Parameter name
        name: &'static str,
    },

    /// No colours to choose from
    #[error("color set must contain at least one color")]
    EmptyColorSet,

    /// Travel direction of zero length
    #[error("direction must be a non-zero vector")]
    ZeroDirection,
}
