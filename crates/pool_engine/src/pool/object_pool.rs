//! Object Pool
//!
//! Owns every item it creates and hands them out by [`ItemHandle`]. Items are
//! built by a host-supplied factory at warm-up and lazily on demand until the
//! pool reaches `max_size`; after that, [`ObjectPool::acquire`] reports
//! [`Exhausted`] until something is released.
//!
//! # Performance Characteristics
//!
//! - **Acquire/Release**: O(1) via a FIFO free list of slot indices
//! - **Memory**: bounded by `max_size`; released items are reused, not rebuilt
//! - **Fairness**: the free list is FIFO so the longest-idle item is reused first
//!
//! # Usage
//!
//! ```rust
//! use pool_engine::item::{KillBoundary, Meteor};
//! use pool_engine::pool::ObjectPool;
//!
//! let mut pool = ObjectPool::new(|| Meteor::new(KillBoundary::default()), 4, 16)?;
//! let handle = pool.acquire()?;
//! pool.release(handle)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::{Exhausted, ItemHandle, PoolError, PoolId};
use crate::config::{Config, Deserialize, Serialize};
use crate::error::ConfigurationError;
use crate::item::PooledItem;
use std::collections::VecDeque;

/// Factory the pool uses to build new items
pub type ItemFactory<T> = Box<dyn FnMut() -> T>;

/// What to do with released items once demand drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkPolicy {
    /// Keep every item ever created
    #[default]
    Disabled,
    /// Destroy released items while more than this many exist
    HighWaterMark(usize),
}

/// Pool sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Items built up front
    pub initial_size: usize,
    /// Hard cap on items alive at once
    pub max_size: usize,
    /// Shrink behaviour on release
    pub shrink_policy: ShrinkPolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 16,
            max_size: 64,
            shrink_policy: ShrinkPolicy::Disabled,
        }
    }
}

impl Config for PoolConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_size == 0 {
            return Err(ConfigurationError::ZeroCapacity);
        }
        if u32::try_from(self.max_size).is_err() {
            return Err(ConfigurationError::CapacityTooLarge { max: self.max_size });
        }
        if self.initial_size > self.max_size {
            return Err(ConfigurationError::InitialExceedsMax {
                initial: self.initial_size,
                max: self.max_size,
            });
        }
        if let ShrinkPolicy::HighWaterMark(mark) = self.shrink_policy {
            if mark < self.initial_size || mark > self.max_size {
                return Err(ConfigurationError::InvalidShrinkMark {
                    mark,
                    initial: self.initial_size,
                    max: self.max_size,
                });
            }
        }
        Ok(())
    }
}

/// Statistics for pool usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Items built by the factory
    pub created: u64,
    /// Items destroyed by shrinking or teardown
    pub destroyed: u64,
    /// Successful acquires
    pub acquired: u64,
    /// Successful releases
    pub released: u64,
    /// Acquires that found the pool exhausted
    pub exhaustions: u64,
    /// Releases rejected as foreign or double
    pub rejected_releases: u64,
    /// Maximum number of items active simultaneously
    pub peak_active: usize,
}

/// Storage slot for one item
struct Slot<T> {
    /// `None` once the item has been destroyed
    item: Option<T>,
    /// Bumped on every release to invalidate outstanding handles
    generation: u32,
    /// Whether the item is checked out
    active: bool,
}

/// Pool of recyclable items
pub struct ObjectPool<T: PooledItem> {
    id: PoolId,
    slots: Vec<Slot<T>>,
    /// Indices of inactive live items, oldest release first
    free_list: VecDeque<u32>,
    /// Indices of destroyed slots, reused on growth
    vacant: Vec<u32>,
    factory: ItemFactory<T>,
    initial_size: usize,
    max_size: usize,
    shrink_policy: ShrinkPolicy,
    /// Number of items currently alive
    live: usize,
    stats: PoolStats,
}

impl<T: PooledItem> ObjectPool<T> {
    /// Create a pool and build `initial_size` items up front
    pub fn new(
        factory: impl FnMut() -> T + 'static,
        initial_size: usize,
        max_size: usize,
    ) -> Result<Self, ConfigurationError> {
        Self::from_config(
            factory,
            &PoolConfig {
                initial_size,
                max_size,
                shrink_policy: ShrinkPolicy::Disabled,
            },
        )
    }

    /// Create a pool from a [`PoolConfig`]
    pub fn from_config(
        factory: impl FnMut() -> T + 'static,
        config: &PoolConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let mut pool = Self {
            id: PoolId::next(),
            slots: Vec::with_capacity(config.max_size),
            free_list: VecDeque::with_capacity(config.max_size),
            vacant: Vec::new(),
            factory: Box::new(factory),
            initial_size: config.initial_size,
            max_size: config.max_size,
            shrink_policy: config.shrink_policy,
            live: 0,
            stats: PoolStats::default(),
        };

        for _ in 0..config.initial_size {
            let index = pool.create_item();
            pool.free_list.push_back(index);
        }

        log::info!(
            "Created ObjectPool {} with {} items (max {}, shrink {:?})",
            pool.id.raw(),
            config.initial_size,
            config.max_size,
            config.shrink_policy
        );

        Ok(pool)
    }

    /// Check an item out of the pool
    ///
    /// Reuses the longest-idle free item, otherwise builds a new one while
    /// below `max_size`. The item is reset before its `on_acquire` hook runs.
    pub fn acquire(&mut self) -> Result<ItemHandle, Exhausted> {
        let index = if let Some(index) = self.free_list.pop_front() {
            index
        } else if self.live < self.max_size {
            let index = self.create_item();
            log::debug!("ObjectPool {} grew to {} items", self.id.raw(), self.live);
            index
        } else {
            self.stats.exhaustions += 1;
            log::debug!("ObjectPool {} exhausted at {} items", self.id.raw(), self.max_size);
            return Err(Exhausted {
                active: self.active_count(),
                max_size: self.max_size,
            });
        };

        let slot = &mut self.slots[index as usize];
        slot.active = true;
        if let Some(item) = slot.item.as_mut() {
            item.reset();
            item.on_acquire();
        }
        let handle = ItemHandle::new(self.id, index, slot.generation);

        self.stats.acquired += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.active_count());

        Ok(handle)
    }

    /// Hand an item back to the pool
    ///
    /// Foreign and double releases are logged and ignored; the pool state is
    /// left exactly as it was.
    pub fn release(&mut self, handle: ItemHandle) -> Result<(), PoolError> {
        if let Err(error) = self.check_release(handle) {
            self.stats.rejected_releases += 1;
            log::warn!("ObjectPool {}: ignoring release: {}", self.id.raw(), error);
            return Err(error);
        }

        let index = handle.index as usize;
        let destroy = match self.shrink_policy {
            ShrinkPolicy::HighWaterMark(mark) => self.live > mark,
            ShrinkPolicy::Disabled => false,
        };

        let slot = &mut self.slots[index];
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(item) = slot.item.as_mut() {
            item.on_release();
            item.reset();
        }

        if destroy {
            if let Some(mut item) = slot.item.take() {
                item.on_destroy();
            }
            self.vacant.push(handle.index);
            self.live -= 1;
            self.stats.destroyed += 1;
            log::debug!("ObjectPool {} shrank to {} items", self.id.raw(), self.live);
        } else {
            self.free_list.push_back(handle.index);
        }

        self.stats.released += 1;
        Ok(())
    }

    fn check_release(&self, handle: ItemHandle) -> Result<(), PoolError> {
        if handle.pool != self.id {
            return Err(PoolError::ForeignItem { handle });
        }
        match self.slots.get(handle.index as usize) {
            None => Err(PoolError::ForeignItem { handle }),
            Some(slot) if slot.item.is_none() => Err(PoolError::ForeignItem { handle }),
            Some(slot) if !slot.active || slot.generation != handle.generation => {
                Err(PoolError::DoubleRelease { handle })
            }
            Some(_) => Ok(()),
        }
    }

    /// Build a new item into a vacant or fresh slot; does not touch the free list
    fn create_item(&mut self) -> u32 {
        let item = (self.factory)();
        let index = if let Some(index) = self.vacant.pop() {
            self.slots[index as usize].item = Some(item);
            index
        } else {
            self.slots.push(Slot {
                item: Some(item),
                generation: 0,
                active: false,
            });
            // max_size is validated to fit in u32
            (self.slots.len() - 1) as u32
        };

        self.live += 1;
        self.stats.created += 1;
        index
    }

    fn active_slot(&self, handle: ItemHandle) -> Option<&Slot<T>> {
        if handle.pool != self.id {
            return None;
        }
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.active && slot.generation == handle.generation)
    }

    /// Get an active item by handle
    pub fn get(&self, handle: ItemHandle) -> Option<&T> {
        self.active_slot(handle).and_then(|slot| slot.item.as_ref())
    }

    /// Get an active item mutably by handle
    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut T> {
        self.active_slot(handle)?;
        self.slots[handle.index as usize].item.as_mut()
    }

    /// Check whether a handle refers to a currently active item
    pub fn is_active(&self, handle: ItemHandle) -> bool {
        self.active_slot(handle).is_some()
    }

    /// Destroy every item, active or not
    ///
    /// Outstanding handles become foreign. The pool can still grow again
    /// afterwards through its factory.
    pub fn teardown(&mut self) {
        if self.live == 0 {
            return;
        }

        log::debug!("Tearing down ObjectPool {} ({} items)", self.id.raw(), self.live);
        for slot in &mut self.slots {
            if let Some(mut item) = slot.item.take() {
                if slot.active {
                    item.on_release();
                }
                item.on_destroy();
                self.stats.destroyed += 1;
            }
            slot.active = false;
            slot.generation = slot.generation.wrapping_add(1);
        }

        self.free_list.clear();
        self.vacant = (0..self.slots.len() as u32).rev().collect();
        self.live = 0;
    }

    /// Id stamped into every handle this pool issues
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Number of items checked out
    pub fn active_count(&self) -> usize {
        self.live - self.free_list.len()
    }

    /// Number of items waiting in the free list
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Number of items alive, active or free
    pub fn total_count(&self) -> usize {
        self.live
    }

    /// Warm-up size
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Hard cap on live items
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Shrink behaviour
    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.shrink_policy
    }

    /// Get pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

impl<T: PooledItem> Drop for ObjectPool<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
