//! Generation-checked handles to pooled items

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of a pool instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u32);

impl PoolId {
    /// Allocate a process-unique pool id
    pub fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Handle to a checked-out item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    /// Pool that issued the handle
    pub pool: PoolId,
    /// Slot index in the pool
    pub index: u32,
    /// Generation counter to prevent use-after-release
    pub generation: u32,
}

impl ItemHandle {
    /// Create a new handle
    pub fn new(pool: PoolId, index: u32, generation: u32) -> Self {
        Self { pool, index, generation }
    }
}

impl std::fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}:{}v{}", self.pool.0, self.index, self.generation)
    }
}
