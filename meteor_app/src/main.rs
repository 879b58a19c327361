//! Headless meteor shower demo
//!
//! Runs one shower on a fixed-step loop and logs what the pool and the spawner
//! are doing. Usage: `meteor_shower [config.toml|config.ron]`. Without an
//! argument the bundled `config/shower.toml` is used, wherever the binary runs from.

use pool_engine::foundation::logging;
use pool_engine::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/shower.toml");

/// Loop settings for the demo host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RunSettings {
    /// Simulation step in seconds
    step: f32,
    /// Catch-up cap per frame
    max_steps_per_frame: u32,
    /// Pace frames against the wall clock instead of running flat out
    realtime: bool,
    /// Hard stop for endless showers
    max_seconds: f32,
    /// Seconds between status lines
    report_interval: f32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            step: 1.0 / 60.0,
            max_steps_per_frame: 5,
            realtime: false,
            max_seconds: 120.0,
            report_interval: 1.0,
        }
    }
}

/// Everything the demo reads from its config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SimulationConfig {
    run: RunSettings,
    pool: PoolConfig,
    boundary: KillBoundary,
    shower: ShowerConfig,
}

impl Config for SimulationConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.run.step.is_finite() && self.run.step > 0.0) {
            return Err(ConfigurationError::NegativeValue { name: "run.step", value: self.run.step });
        }
        self.pool.validate()?;
        self.shower.validate()
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Stand-in for a mesh: reports visibility changes to the log
struct LogPresenter {
    id: u32,
}

impl MeteorPresenter for LogPresenter {
    fn show(&mut self) {
        log::trace!("meteor {} visible", self.id);
    }

    fn update(&mut self, state: &MeteorState) {
        log::trace!("meteor {} at ({:.1}, {:.1}, {:.1})", self.id, state.position.x, state.position.y, state.position.z);
    }

    fn hide(&mut self) {
        log::trace!("meteor {} hidden", self.id);
    }

    fn destroy(&mut self) {
        log::debug!("meteor {} destroyed", self.id);
    }
}

fn build_shower(config: &SimulationConfig) -> Result<ShowerSystem<Meteor>, AppError> {
    let boundary = config.boundary;
    let mut next_id = 0;
    let pool = ObjectPool::from_config(
        move || {
            next_id += 1;
            Meteor::with_presenter(boundary, Box::new(LogPresenter { id: next_id }))
        },
        &config.pool,
    )?;

    let mut shower = ShowerSystem::new(pool);
    shower.start(config.shower.clone())?;
    Ok(shower)
}

fn report(shower: &ShowerSystem<Meteor>, sim_time: f32) {
    let pool = shower.pool();
    let stats = shower.stats();
    log::info!(
        "t={:6.2}s active {:3}/{:3} (pool {} items, {:.0}% used) spawned {} recycled {}",
        sim_time,
        pool.active_count(),
        pool.max_size(),
        pool.total_count(),
        stats.utilization * 100.0,
        shower.orchestrator().stats().total_spawned,
        stats.auto_recycled + stats.manual_recycled,
    );
    if stats.is_nearly_full() {
        log::warn!("Pool is nearly full; spawns will start being skipped");
    }
}

fn run(config: &SimulationConfig) -> Result<(), AppError> {
    let mut shower = build_shower(config)?;
    let mut timestep = FixedTimestep::new(config.run.step, config.run.max_steps_per_frame);
    let mut timer = Timer::new();
    let mut report_countdown = Countdown::new(config.run.report_interval);
    let mut sim_time = 0.0_f32;

    while shower.is_running() || !shower.active_handles().is_empty() {
        let frame_time = if config.run.realtime {
            std::thread::sleep(Duration::from_secs_f32(config.run.step));
            timer.update();
            timer.delta_time()
        } else {
            config.run.step
        };

        for _ in 0..timestep.accumulate(frame_time) {
            shower.update(timestep.step());
            sim_time += timestep.step();
        }

        if report_countdown.advance(frame_time) {
            report_countdown.reset(config.run.report_interval);
            report(&shower, sim_time);
        }

        if sim_time >= config.run.max_seconds {
            log::info!("Reached {:.0}s limit, recycling what is left", config.run.max_seconds);
            shower.stop();
            shower.recycle_all();
        }
    }

    report(&shower, sim_time);
    let spawner = shower.orchestrator().stats();
    let pool = shower.pool().stats();
    log::info!(
        "Shower finished: {} attempts, {} spawned, {} skipped ({:.0}% success)",
        spawner.spawn_attempts,
        spawner.total_spawned,
        spawner.skipped_exhausted,
        spawner.success_rate() * 100.0
    );
    log::info!(
        "Pool: {} created, {} destroyed, peak {} active, {} exhaustions",
        pool.created,
        pool.destroyed,
        pool.peak_active,
        pool.exhaustions
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting meteor shower demo");

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = SimulationConfig::load_or_default(&path).map_err(AppError::from)?;

    run(&config)?;
    Ok(())
}
