//! Spawn Orchestrator
//!
//! Decides when to spawn and with which parameters, independently of how the
//! pool stores items and of how items behave once spawned.
//!
//! # Architecture
//!
//! ```text
//! host tick(dt) → SpawnOrchestrator → ObjectPool::acquire → PooledItem::configure
//!                      |                      |
//!              interval countdown        Exhausted → skip
//!              duration check
//! ```
//!
//! A shower spawns on its first tick, then waits a random interval drawn from
//! `[min_interval, max_interval]` between attempts. At most one item is
//! spawned per tick. Bounded showers stop themselves once `total_duration`
//! has elapsed; items already in flight are left alone.

use super::{ShowerConfig, SpawnerStats};
use crate::config::Config;
use crate::error::ConfigurationError;
use crate::foundation::math::Vec3;
use crate::foundation::time::{self, Countdown};
use crate::item::{Color, ItemParameters, PooledItem};
use crate::pool::{ItemHandle, ObjectPool};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Drives the cadence of a shower
pub struct SpawnOrchestrator {
    config: ShowerConfig,
    /// Unit travel direction resolved at start
    direction: Vec3,
    running: bool,
    /// Seconds since start, summed in `f64` so long showers end on time
    elapsed: f64,
    spawn_countdown: Countdown,
    rng: StdRng,
    stats: SpawnerStats,
}

impl Default for SpawnOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnOrchestrator {
    /// Create an idle orchestrator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an idle orchestrator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let config = ShowerConfig::default();
        let direction = config.unit_direction().unwrap_or_else(|| Vec3::new(0.0, -1.0, 0.0));
        Self {
            config,
            direction,
            running: false,
            elapsed: 0.0,
            spawn_countdown: Countdown::elapsed(),
            rng,
            stats: SpawnerStats::default(),
        }
    }

    /// Start a shower
    ///
    /// Starting while a shower is already running logs a warning and changes
    /// nothing, timers included. An invalid config is rejected and the
    /// orchestrator stays stopped. A seed in the config reseeds the RNG.
    pub fn start(&mut self, config: ShowerConfig) -> Result<(), ConfigurationError> {
        if self.running {
            log::warn!(
                "Shower already running ({:.2}s elapsed), ignoring start",
                self.elapsed
            );
            return Ok(());
        }

        config.validate()?;
        let direction = config.unit_direction().ok_or(ConfigurationError::ZeroDirection)?;

        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        log::info!(
            "Starting shower: duration {}, interval {:.2}..{:.2}s",
            if config.is_bounded() {
                format!("{:.1}s", config.total_duration)
            } else {
                "unbounded".to_string()
            },
            config.min_interval,
            config.max_interval
        );

        self.config = config;
        self.direction = direction;
        self.elapsed = 0.0;
        self.spawn_countdown = Countdown::elapsed();
        self.running = true;
        self.stats.showers_started += 1;
        Ok(())
    }

    /// Stop the shower; calling it again has no effect
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!(
                "Shower stopped after {:.2}s ({} spawned)",
                self.elapsed,
                self.stats.total_spawned
            );
        }
    }

    /// Advance the shower by `delta_time` seconds
    ///
    /// Returns the handle of the item spawned this tick, if any. Pool
    /// exhaustion is not an error: the attempt is skipped and counted.
    pub fn tick<T: PooledItem>(
        &mut self,
        delta_time: f32,
        pool: &mut ObjectPool<T>,
    ) -> Option<ItemHandle> {
        if !self.running {
            return None;
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring invalid delta time {}", delta_time);
            return None;
        }

        self.elapsed += f64::from(delta_time);
        if self.config.is_bounded()
            && time::has_reached(self.elapsed, f64::from(self.config.total_duration))
        {
            self.stats.showers_completed += 1;
            self.stop();
            return None;
        }

        if !self.spawn_countdown.advance(delta_time) {
            return None;
        }

        let interval = self.config.interval_range().sample(&mut self.rng);
        self.spawn_countdown.reset(interval);
        self.stats.spawn_attempts += 1;

        match pool.acquire() {
            Ok(handle) => {
                let params = self.sample_parameters();
                if let Some(item) = pool.get_mut(handle) {
                    item.configure(&params);
                }
                self.stats.total_spawned += 1;
                log::trace!("Spawned {} at {:?}", handle, params.origin);
                Some(handle)
            }
            Err(exhausted) => {
                self.stats.skipped_exhausted += 1;
                log::debug!("Skipping spawn: {}", exhausted);
                None
            }
        }
    }

    /// Draw spawn parameters from the current config
    pub fn sample_parameters(&mut self) -> ItemParameters {
        let config = &self.config;
        let rng = &mut self.rng;
        ItemParameters {
            origin: config.spawn_area.sample(rng),
            direction: self.direction,
            speed: config.speed.sample(rng),
            scale: config.size.sample(rng),
            color: config.colors.choose(rng).copied().unwrap_or(Color::WHITE),
            lifetime: config.lifetime.sample(rng),
        }
    }

    /// Whether a shower is in progress
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the current (or last) shower started
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Seconds until the next spawn attempt
    pub fn next_spawn_in(&self) -> f32 {
        self.spawn_countdown.remaining()
    }

    /// Config of the current (or last) shower
    pub fn config(&self) -> &ShowerConfig {
        &self.config
    }

    /// Get spawner statistics
    pub fn stats(&self) -> &SpawnerStats {
        &self.stats
    }
}
