//! Timed spawning
//!
//! [`SpawnOrchestrator`] decides when to pull items from a pool and how to
//! configure them; [`ShowerSystem`] ties an orchestrator to a pool and keeps
//! the spawned items moving until they recycle themselves.

pub mod config;
pub mod orchestrator;
pub mod stats;
pub mod system;

pub use config::*;
pub use orchestrator::*;
pub use stats::*;
pub use system::*;
