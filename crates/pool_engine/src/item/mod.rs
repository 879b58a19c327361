//! Pooled items
//!
//! A pooled item is a recyclable, timed entity. The pool only tracks whether an
//! item is checked out; the item itself owns its countdown and boundary check
//! and is the sole authority on when it is done.
//!
//! ```text
//!   Inactive --acquire--> Active --tick() == true / release--> Inactive
//! ```

pub mod lifetime;
pub mod meteor;

pub use lifetime::*;
pub use meteor::*;

use crate::config::{Deserialize, Serialize};
use crate::foundation::math::Vec3;

/// Behaviour every item managed by an [`ObjectPool`](crate::pool::ObjectPool) provides
pub trait PooledItem {
    /// Apply spawn parameters and restart the lifetime countdown
    ///
    /// A `lifetime <= 0` disables time-based expiry; the item then relies on
    /// its boundary check alone.
    fn configure(&mut self, params: &ItemParameters);

    /// Advance the item by `delta_time` seconds
    ///
    /// Returns true when the item should be recycled.
    fn tick(&mut self, delta_time: f32) -> bool;

    /// Return to a neutral state. Called on every acquire and release.
    fn reset(&mut self);

    /// Hook run when the item is checked out of the pool
    fn on_acquire(&mut self) {}

    /// Hook run when the item is handed back to the pool
    fn on_release(&mut self) {}

    /// Hook run when the pool destroys the item
    fn on_destroy(&mut self) {}
}

/// RGBA colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    #[serde(default = "Color::opaque")]
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Create an opaque colour
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a colour with alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn opaque() -> f32 {
        1.0
    }

    /// Components as an array, for handing to a renderer
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parameters sampled by the spawner and applied with [`PooledItem::configure`]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemParameters {
    /// Spawn position
    pub origin: Vec3,
    /// Unit travel direction
    pub direction: Vec3,
    /// Travel speed in units per second
    pub speed: f32,
    /// Uniform scale
    pub scale: f32,
    /// Tint
    pub color: Color,
    /// Seconds until time-based expiry; `<= 0` disables it
    pub lifetime: f32,
}

impl Default for ItemParameters {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            direction: Vec3::new(0.0, -1.0, 0.0),
            speed: 0.0,
            scale: 1.0,
            color: Color::WHITE,
            lifetime: 0.0,
        }
    }
}
