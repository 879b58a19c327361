//! Shower System
//!
//! The "world" side of a shower: owns the pool, the orchestrator and the set of
//! items currently in flight, and advances all of them from one host call.
//!
//! # Usage
//!
//! ```rust
//! use pool_engine::item::{KillBoundary, Meteor};
//! use pool_engine::pool::ObjectPool;
//! use pool_engine::spawn::{ShowerConfig, ShowerSystem, SpawnOrchestrator};
//!
//! let pool = ObjectPool::new(|| Meteor::new(KillBoundary::default()), 8, 32)?;
//! let mut shower = ShowerSystem::with_orchestrator(pool, SpawnOrchestrator::with_seed(7));
//! shower.start(ShowerConfig::default())?;
//!
//! for _ in 0..600 {
//!     shower.update(1.0 / 60.0);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::{ShowerConfig, ShowerStats, SpawnOrchestrator};
use crate::error::ConfigurationError;
use crate::item::PooledItem;
use crate::pool::{ItemHandle, ObjectPool, PoolError};

/// Pool, orchestrator and in-flight items of one shower
pub struct ShowerSystem<T: PooledItem> {
    pool: ObjectPool<T>,
    orchestrator: SpawnOrchestrator,
    /// Handles of items in flight, oldest first
    active: Vec<ItemHandle>,
    stats: ShowerStats,
}

impl<T: PooledItem> ShowerSystem<T> {
    /// Create a shower around an existing pool
    pub fn new(pool: ObjectPool<T>) -> Self {
        Self::with_orchestrator(pool, SpawnOrchestrator::new())
    }

    /// Create a shower with a specific orchestrator (e.g. a seeded one)
    pub fn with_orchestrator(pool: ObjectPool<T>, orchestrator: SpawnOrchestrator) -> Self {
        let mut stats = ShowerStats::default();
        stats.update_active(0, pool.max_size());
        Self {
            active: Vec::with_capacity(pool.max_size()),
            pool,
            orchestrator,
            stats,
        }
    }

    /// Start spawning; see [`SpawnOrchestrator::start`]
    pub fn start(&mut self, config: ShowerConfig) -> Result<(), ConfigurationError> {
        self.orchestrator.start(config)
    }

    /// Stop spawning; items in flight keep going until they recycle themselves
    pub fn stop(&mut self) {
        self.orchestrator.stop();
    }

    /// Advance the shower by `delta_time` seconds (call once per frame)
    ///
    /// Items in flight are ticked first and recycled when they report done,
    /// then the orchestrator gets its chance to spawn. A freshly spawned item
    /// starts moving on the following update.
    pub fn update(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring invalid delta time {}", delta_time);
            return;
        }

        let pool = &mut self.pool;
        let stats = &mut self.stats;
        self.active.retain(|&handle| {
            let Some(item) = pool.get_mut(handle) else {
                // Released behind our back, e.g. by a pool teardown
                return false;
            };
            if !item.tick(delta_time) {
                return true;
            }
            if pool.release(handle).is_ok() {
                stats.auto_recycled += 1;
            }
            false
        });

        if let Some(handle) = self.orchestrator.tick(delta_time, &mut self.pool) {
            self.active.push(handle);
        }

        self.stats.update_active(self.active.len(), self.pool.max_size());
    }

    /// Recycle one item early
    pub fn release(&mut self, handle: ItemHandle) -> Result<(), PoolError> {
        self.pool.release(handle)?;
        self.active.retain(|h| *h != handle);
        self.stats.manual_recycled += 1;
        self.stats.update_active(self.active.len(), self.pool.max_size());
        Ok(())
    }

    /// Recycle every item in flight
    pub fn recycle_all(&mut self) {
        let count = self.active.len();
        for handle in self.active.drain(..) {
            if self.pool.release(handle).is_ok() {
                self.stats.manual_recycled += 1;
            }
        }
        self.stats.update_active(0, self.pool.max_size());
        log::debug!("Recycled {} in-flight items", count);
    }

    /// Items in flight with their handles, oldest first
    pub fn active_items(&self) -> impl Iterator<Item = (ItemHandle, &T)> + '_ {
        self.active
            .iter()
            .filter_map(|&handle| self.pool.get(handle).map(|item| (handle, item)))
    }

    /// Handles of items in flight, oldest first
    pub fn active_handles(&self) -> &[ItemHandle] {
        &self.active
    }

    /// Whether the orchestrator is spawning
    pub fn is_running(&self) -> bool {
        self.orchestrator.is_running()
    }

    /// Underlying pool
    pub fn pool(&self) -> &ObjectPool<T> {
        &self.pool
    }

    /// Underlying orchestrator
    pub fn orchestrator(&self) -> &SpawnOrchestrator {
        &self.orchestrator
    }

    /// Get shower statistics
    pub fn stats(&self) -> &ShowerStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{KillBoundary, Meteor};
    use crate::spawn::FloatRange;

    fn shower(max: usize, boundary: KillBoundary) -> ShowerSystem<Meteor> {
        let pool = ObjectPool::new(move || Meteor::new(boundary), 0, max).unwrap();
        ShowerSystem::with_orchestrator(pool, SpawnOrchestrator::with_seed(5))
    }

    fn config(lifetime: f32) -> ShowerConfig {
        ShowerConfig {
            total_duration: 0.0,
            min_interval: 1.0,
            max_interval: 1.0,
            lifetime: FloatRange::constant(lifetime),
            seed: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_items_recycle_after_lifetime() {
        let mut system = shower(8, KillBoundary::unbounded());
        system.start(config(2.0)).unwrap();

        system.update(1.0); // spawn A
        assert_eq!(system.active_handles().len(), 1);
        system.update(1.0); // A at 1s, spawn B
        assert_eq!(system.active_handles().len(), 2);
        system.update(1.0); // A at 2s -> recycled, spawn C
        assert_eq!(system.active_handles().len(), 2);
        assert_eq!(system.stats().auto_recycled, 1);
        assert_eq!(system.pool().total_count(), 2);
    }

    #[test]
    fn test_stop_leaves_items_in_flight() {
        let mut system = shower(8, KillBoundary::unbounded());
        system.start(config(3.0)).unwrap();
        system.update(1.0);
        system.update(1.0);
        system.stop();
        assert_eq!(system.active_handles().len(), 2);

        system.update(1.0);
        assert_eq!(system.active_handles().len(), 2);
        system.update(1.0); // first item reaches 3s
        assert_eq!(system.active_handles().len(), 1);
        system.update(1.0);
        assert!(system.active_handles().is_empty());
        assert_eq!(system.pool().active_count(), 0);
        assert_eq!(system.orchestrator().stats().total_spawned, 2);
    }

    #[test]
    fn test_manual_release_and_recycle_all() {
        let mut system = shower(8, KillBoundary::unbounded());
        system.start(config(0.0)).unwrap();
        for _ in 0..3 {
            system.update(1.0);
        }
        let first = system.active_handles()[0];

        system.release(first).unwrap();
        assert_eq!(system.active_handles().len(), 2);
        assert!(matches!(system.release(first), Err(PoolError::DoubleRelease { .. })));

        system.recycle_all();
        assert!(system.active_handles().is_empty());
        assert_eq!(system.pool().free_count(), 3);
        assert_eq!(system.stats().manual_recycled, 3);
    }

    #[test]
    fn test_boundary_recycles_without_lifetime() {
        let boundary = KillBoundary { floor: Some(95.0), max_distance: None };
        let mut system = shower(4, boundary);
        let config = ShowerConfig {
            speed: FloatRange::constant(10.0),
            direction: crate::foundation::math::Vec3::new(0.0, -1.0, 0.0),
            ..config(0.0)
        };
        system.start(config).unwrap();

        system.update(0.25); // spawn at y = 100
        system.update(0.25); // y = 97.5
        assert_eq!(system.active_handles().len(), 1);
        system.update(0.25); // y = 95.0
        system.update(0.25); // y = 92.5 -> recycled
        assert_eq!(system.stats().auto_recycled, 1);
    }

    #[test]
    fn test_exhausted_pool_degrades_gracefully() {
        let mut system = shower(2, KillBoundary::unbounded());
        system.start(config(0.0)).unwrap();
        for _ in 0..6 {
            system.update(1.0);
        }
        assert_eq!(system.active_handles().len(), 2);
        assert!(system.is_running());
        assert_eq!(system.orchestrator().stats().skipped_exhausted, 4);
        assert_eq!(system.stats().utilization, 1.0);
    }

    #[test]
    fn test_active_items_iterates_in_spawn_order() {
        let mut system = shower(4, KillBoundary::unbounded());
        system.start(config(0.0)).unwrap();
        system.update(1.0);
        system.update(1.0);

        let handles: Vec<_> = system.active_items().map(|(handle, _)| handle).collect();
        assert_eq!(handles, system.active_handles());
        assert!(system.active_items().all(|(_, meteor)| meteor.is_visible()));
    }
}
