//! Time management utilities
//!
//! Everything in the engine is advanced by an explicit `delta_time` in seconds.
//! [`Countdown`] is the accumulator used for spawn cadence and item lifetimes,
//! [`FixedTimestep`] turns variable frame times into fixed simulation steps and
//! [`Timer`] measures real frame time for hosts that run in real time.

use std::time::Instant;

/// Relative slack allowed when comparing summed time against a target
///
/// Time is summed in `f64`, so what is left to absorb is the rounding of the
/// `f32` inputs themselves (ten ticks of `0.1` should expire a one second
/// countdown). The slack scales with the target and stays well below one
/// tick for any realistic step count.
pub const EXPIRY_TOLERANCE: f64 = 4.0 * f32::EPSILON as f64;

/// Whether `elapsed` seconds have reached `target` seconds
///
/// A target of zero or less is reached immediately.
pub fn has_reached(elapsed: f64, target: f64) -> bool {
    elapsed >= target - target.abs() * EXPIRY_TOLERANCE
}

/// A count-down accumulator in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f64,
    elapsed: f64,
}

impl Countdown {
    /// Create a countdown with the given number of seconds left
    pub fn new(seconds: f32) -> Self {
        Self { duration: f64::from(seconds), elapsed: 0.0 }
    }

    /// Create a countdown that is already elapsed
    pub fn elapsed() -> Self {
        Self { duration: 0.0, elapsed: 0.0 }
    }

    /// Restart the countdown
    pub fn reset(&mut self, seconds: f32) {
        *self = Self::new(seconds);
    }

    /// Consume `delta_time` seconds, returning true once the countdown has elapsed
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.elapsed += f64::from(delta_time);
        self.is_elapsed()
    }

    /// Whether no time is left
    pub fn is_elapsed(&self) -> bool {
        has_reached(self.elapsed, self.duration)
    }

    /// Seconds left, never negative
    pub fn remaining(&self) -> f32 {
        if self.is_elapsed() {
            0.0
        } else {
            (self.duration - self.elapsed) as f32
        }
    }
}

/// Fixed-step accumulator for deterministic simulation
///
/// Frame time is banked and paid out in whole `step`s. The number of steps per
/// frame is capped so a long stall does not trigger a spiral of catch-up work.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl FixedTimestep {
    /// Create a fixed-step accumulator; `step` must be positive
    pub fn new(step: f32, max_steps_per_frame: u32) -> Self {
        debug_assert!(step > 0.0, "fixed step must be positive");
        Self {
            step,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    /// Step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Bank a frame's worth of time and return how many steps to run
    pub fn accumulate(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps_per_frame && self.accumulator >= self.step {
            log::debug!(
                "Dropping {:.3}s of simulation time after {} catch-up steps",
                self.accumulator,
                steps
            );
            self.accumulator %= self.step;
        }

        steps
    }

    /// Fraction of a step currently banked (for interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_on_exact_boundary() {
        let mut countdown = Countdown::new(1.0);
        assert!(!countdown.advance(0.25));
        assert!(!countdown.advance(0.25));
        assert!(!countdown.advance(0.25));
        assert!(countdown.advance(0.25));
        assert_eq!(countdown.remaining(), 0.0);
    }

    #[test]
    fn test_countdown_absorbs_decimal_drift() {
        let mut countdown = Countdown::new(1.0);
        let expired: Vec<bool> = (0..10).map(|_| countdown.advance(0.1)).collect();
        assert!(expired[..9].iter().all(|e| !e));
        assert!(expired[9]);
    }

    #[test]
    fn test_countdown_long_duration_at_frame_rate() {
        let step = 1.0_f32 / 60.0;
        for (seconds, expected_ticks) in [(60.0_f32, 3_600_u32), (300.0, 18_000)] {
            let mut countdown = Countdown::new(seconds);
            let mut ticks = 0;
            while !countdown.advance(step) {
                ticks += 1;
            }
            assert_eq!(ticks + 1, expected_ticks, "{seconds}s countdown");
        }
    }

    #[test]
    fn test_countdown_tiny_steps_do_not_expire_early() {
        let mut countdown = Countdown::new(1.0);
        let mut ticks = 0_u32;
        while !countdown.advance(1.0e-6) {
            ticks += 1;
        }
        assert_eq!(ticks + 1, 1_000_000);
    }

    #[test]
    fn test_has_reached() {
        assert!(has_reached(0.0, 0.0));
        assert!(has_reached(0.0, -1.0));
        assert!(!has_reached(0.5, 1.0));
        assert!(has_reached(1.0, 1.0));
        assert!(!has_reached(299.99, 300.0));
    }

    #[test]
    fn test_countdown_reset() {
        let mut countdown = Countdown::elapsed();
        assert!(countdown.is_elapsed());
        countdown.reset(2.0);
        assert!(!countdown.is_elapsed());
        assert_eq!(countdown.remaining(), 2.0);
    }

    #[test]
    fn test_fixed_timestep_banks_remainder() {
        let mut timestep = FixedTimestep::new(0.5, 8);
        assert_eq!(timestep.accumulate(0.75), 1);
        assert_eq!(timestep.accumulate(0.25), 1);
        assert_eq!(timestep.accumulate(0.25), 0);
        assert!((timestep.alpha() - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn test_fixed_timestep_caps_catch_up() {
        let mut timestep = FixedTimestep::new(0.1, 3);
        assert_eq!(timestep.accumulate(10.0), 3);
        // Backlog beyond the cap is dropped rather than carried over
        assert_eq!(timestep.accumulate(0.0), 0);
    }
}
