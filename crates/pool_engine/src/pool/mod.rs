//! Object pooling
//!
//! Pre-allocated storage for recyclable items with handle-based access.
//!
//! ```text
//!   factory ──warm-up / growth──> slots ──acquire──> ItemHandle (active)
//!                                   ^                      │
//!                                   └──────release─────────┘
//! ```
//!
//! Handles carry the id of the pool that issued them and a generation counter,
//! so releasing an item into the wrong pool or releasing it twice is detected
//! and ignored instead of corrupting the free list.

pub mod handle;
pub mod object_pool;

pub use handle::*;
pub use object_pool::*;

use thiserror::Error;

/// The pool is at capacity and cannot grow
///
/// A soft condition: callers are expected to skip the spawn and try again later.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pool exhausted: {active}/{max_size} items active")]
pub struct Exhausted {
    /// Items checked out when the request failed
    pub active: usize,
    /// Pool cap
    pub max_size: usize,
}

/// Misuse of [`ObjectPool::release`]
///
/// Both variants are logged by the pool and leave its state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Handle was not issued by this pool or points at a destroyed slot
    #[error("item {handle} does not belong to this pool")]
    ForeignItem {
        /// The offending handle
        handle: ItemHandle,
    },

    /// Item is already back in the pool
    #[error("item {handle} was already released")]
    DoubleRelease {
        /// The offending handle
        handle: ItemHandle,
    },
}
