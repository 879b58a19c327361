//! # Pool Engine
//!
//! Object pooling with timed spawn orchestration for short-lived simulation
//! objects: meteors in a shower, sparks, debris, projectiles.
//!
//! ## Features
//!
//! - **Object Pool**: bounded, lazily grown pool with generation-checked handles
//! - **Pooled Items**: self-timed items that report when they are done
//! - **Spawn Orchestration**: randomized cadence for bounded or endless showers
//! - **Host Agnostic**: everything advances from a single `update(delta_time)`
//! - **Configuration**: TOML and RON config files with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use pool_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = ObjectPool::new(|| Meteor::new(KillBoundary::default()), 16, 64)?;
//!     let mut shower = ShowerSystem::new(pool);
//!     shower.start(ShowerConfig { total_duration: 5.0, ..Default::default() })?;
//!
//!     while shower.is_running() || !shower.active_handles().is_empty() {
//!         shower.update(1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod item;
pub mod pool;
pub mod spawn;

#[cfg(test)]
mod tests;

pub use error::ConfigurationError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        error::ConfigurationError,
        foundation::{
            math::Vec3,
            time::{Countdown, FixedTimestep, Timer},
        },
        item::{Color, ItemParameters, KillBoundary, Lifetime, Meteor, MeteorPresenter, MeteorState, PooledItem},
        pool::{Exhausted, ItemHandle, ObjectPool, PoolConfig, PoolError, ShrinkPolicy},
        spawn::{FloatRange, ShowerConfig, ShowerSystem, SpawnArea, SpawnOrchestrator},
    };
}
