//! Spawner and shower statistics

/// Statistics about the spawn orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnerStats {
    /// Showers started
    pub showers_started: u64,
    /// Bounded showers that ran their full duration
    pub showers_completed: u64,
    /// Times the spawn countdown elapsed
    pub spawn_attempts: u64,
    /// Items successfully spawned
    pub total_spawned: u64,
    /// Attempts skipped because the pool was exhausted
    pub skipped_exhausted: u64,
}

impl SpawnerStats {
    /// Fraction of attempts that produced an item (0.0 to 1.0)
    pub fn success_rate(&self) -> f32 {
        if self.spawn_attempts > 0 {
            self.total_spawned as f32 / self.spawn_attempts as f32
        } else {
            1.0
        }
    }
}

/// Statistics about items living in a shower
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowerStats {
    /// Current number of active items
    pub active_items: usize,
    /// Pool cap
    pub max_capacity: usize,
    /// Items recycled because they reported done
    pub auto_recycled: u64,
    /// Items released explicitly by the host
    pub manual_recycled: u64,
    /// Peak number of items active simultaneously
    pub peak_active: usize,
    /// Pool utilization (0.0 to 1.0)
    pub utilization: f32,
}

impl ShowerStats {
    /// Refresh active count, peak and utilization
    pub fn update_active(&mut self, active_items: usize, max_capacity: usize) {
        self.active_items = active_items;
        self.max_capacity = max_capacity;
        self.peak_active = self.peak_active.max(active_items);
        self.utilization = if max_capacity > 0 {
            active_items as f32 / max_capacity as f32
        } else {
            0.0
        };
    }

    /// Check if pool is nearly full (>90% utilization)
    pub fn is_nearly_full(&self) -> bool {
        self.utilization > 0.9
    }
}
