//! Cross-component scenarios: pool + orchestrator + items + config files


use crate::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn meteor_pool(initial: usize, max: usize) -> ObjectPool<Meteor> {
    ObjectPool::new(|| Meteor::new(KillBoundary::default()), initial, max).expect("valid pool")
}

#[test]
fn test_warm_pool_exhaustion_scenario() {
    let mut pool = meteor_pool(2, 2);

    let a = pool.acquire().expect("first acquire");
    let b = pool.acquire().expect("second acquire");
    assert_ne!(a, b);
    assert!(pool.acquire().is_err());

    pool.release(a).expect("release");
    let again = pool.acquire().expect("reuse");
    assert_eq!(again.index, a.index);
    assert_eq!(pool.stats().created, 2);
}

#[test]
fn test_exhaustion_is_soft() {
    let max = 5;
    let mut pool = meteor_pool(0, max);
    for _ in 0..max {
        pool.acquire().expect("capacity left");
    }
    let result = pool.acquire();
    assert_eq!(result, Err(Exhausted { active: max, max_size: max }));
    assert_eq!(pool.total_count(), max);
}

#[test]
fn test_random_acquire_release_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut pool = meteor_pool(3, 12);
    let mut held: Vec<ItemHandle> = Vec::new();

    for _ in 0..2_000 {
        if rng.gen_bool(0.55) {
            match pool.acquire() {
                Ok(handle) => {
                    assert!(!held.contains(&handle), "handle {handle} handed out twice");
                    held.push(handle);
                }
                Err(_) => assert_eq!(held.len(), pool.max_size()),
            }
        } else if !held.is_empty() {
            let handle = held.swap_remove(rng.gen_range(0..held.len()));
            pool.release(handle).expect("held handle releases");
        }

        assert_eq!(pool.active_count() + pool.free_count(), pool.total_count());
        assert!(pool.total_count() <= pool.max_size());
        assert_eq!(pool.active_count(), held.len());
    }
}

#[test]
fn test_bounded_shower_scenario() {
    let pool = meteor_pool(0, 16);
    let mut shower = ShowerSystem::with_orchestrator(pool, SpawnOrchestrator::with_seed(8));
    shower
        .start(ShowerConfig {
            total_duration: 5.0,
            min_interval: 1.0,
            max_interval: 1.0,
            ..Default::default()
        })
        .unwrap();

    let mut spawned_per_tick = Vec::new();
    for _ in 0..6 {
        let before = shower.orchestrator().stats().spawn_attempts;
        shower.update(1.0);
        spawned_per_tick.push(shower.orchestrator().stats().spawn_attempts - before);
    }

    assert!(!shower.is_running());
    assert_eq!(spawned_per_tick[5], 0);
    assert_eq!(spawned_per_tick[4], 0);
}

#[test]
fn test_invalid_config_leaves_shower_stopped() {
    let mut shower = ShowerSystem::new(meteor_pool(1, 1));
    let result = shower.start(ShowerConfig { min_interval: 2.0, max_interval: 1.0, ..Default::default() });
    assert!(matches!(result, Err(ConfigurationError::InvalidRange { .. })));
    assert!(!shower.is_running());

    shower.update(1.0);
    assert!(shower.active_handles().is_empty());
}

#[test]
fn test_full_shower_drains_back_into_pool() {
    let pool = meteor_pool(4, 32);
    let mut shower = ShowerSystem::with_orchestrator(pool, SpawnOrchestrator::with_seed(1));
    shower
        .start(ShowerConfig { total_duration: 10.0, seed: Some(77), ..Default::default() })
        .unwrap();

    let mut timestep = FixedTimestep::new(1.0 / 60.0, 4);
    let mut frames = 0;
    while shower.is_running() || !shower.active_handles().is_empty() {
        for _ in 0..timestep.accumulate(1.0 / 30.0) {
            shower.update(timestep.step());
        }
        frames += 1;
        assert!(frames < 10_000, "shower never drained");
    }

    let pool = shower.pool();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.free_count(), pool.total_count());
    assert!(pool.total_count() <= pool.max_size());

    let spawned = shower.orchestrator().stats().total_spawned;
    assert!(spawned > 0);
    assert_eq!(shower.stats().auto_recycled, spawned);
}

#[test]
fn test_independent_showers_do_not_share_items() {
    let mut left = ShowerSystem::with_orchestrator(meteor_pool(0, 4), SpawnOrchestrator::with_seed(1));
    let mut right = ShowerSystem::with_orchestrator(meteor_pool(0, 4), SpawnOrchestrator::with_seed(1));
    left.start(ShowerConfig { total_duration: 0.0, ..Default::default() }).unwrap();
    right.start(ShowerConfig { total_duration: 0.0, ..Default::default() }).unwrap();
    left.update(0.1);
    right.update(0.1);

    let handle = left.active_handles()[0];
    assert!(matches!(right.release(handle), Err(PoolError::ForeignItem { .. })));
    assert_eq!(right.active_handles().len(), 1);
    assert!(left.pool().is_active(handle));
}
