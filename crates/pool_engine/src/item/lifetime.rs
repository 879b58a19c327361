//! Lifetime countdown for pooled items

use crate::foundation::time::Countdown;

/// Time-based expiry for a pooled item
///
/// A duration of zero or less means the item never expires on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// How long the item should live (in seconds)
    duration: f32,
    /// Time lived since the last restart
    age: f64,
    /// `None` for infinite lifetimes
    countdown: Option<Countdown>,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::infinite()
    }
}

impl Lifetime {
    /// Create a lifetime of `duration` seconds
    pub fn new(duration: f32) -> Self {
        let countdown = (duration > 0.0).then(|| Countdown::new(duration));
        Self { duration, age: 0.0, countdown }
    }

    /// A lifetime that never expires
    pub fn infinite() -> Self {
        Self { duration: 0.0, age: 0.0, countdown: None }
    }

    /// Restart with a new duration
    pub fn restart(&mut self, duration: f32) {
        *self = Self::new(duration);
    }

    /// Advance by `delta_time`, returning true once expired
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.age += f64::from(delta_time);
        match self.countdown.as_mut() {
            Some(countdown) => countdown.advance(delta_time),
            None => false,
        }
    }

    /// Check if this lifetime has expired
    pub fn is_expired(&self) -> bool {
        self.countdown.map_or(false, |countdown| countdown.is_elapsed())
    }

    /// Whether time-based expiry is disabled
    pub fn is_infinite(&self) -> bool {
        self.countdown.is_none()
    }

    /// Get remaining lifetime in seconds
    pub fn remaining(&self) -> f32 {
        self.countdown.map_or(f32::INFINITY, |countdown| countdown.remaining())
    }

    /// Configured duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds lived since the last restart
    pub fn age(&self) -> f32 {
        self.age as f32
    }
}
