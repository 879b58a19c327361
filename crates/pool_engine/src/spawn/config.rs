//! Shower configuration
//!
//! Plain serde data describing one shower: how long it runs, how often it
//! spawns and the ranges spawn parameters are drawn from. Nothing here is
//! clamped; [`ShowerConfig::validate`] rejects bad values and the orchestrator
//! refuses to start with them.

use crate::config::{Config, Deserialize, Serialize};
use crate::error::ConfigurationError;
use crate::foundation::math::{self, Vec3};
use crate::item::Color;
use rand::Rng;

/// Closed range of floats sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl FloatRange {
    /// Create a range
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range holding a single value
    pub const fn constant(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Check bounds are finite, ordered and (unless `allow_negative`) not negative
    pub fn validate(&self, name: &'static str, allow_negative: bool) -> Result<(), ConfigurationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigurationError::NonFinite { name });
        }
        if !allow_negative && self.min < 0.0 {
            return Err(ConfigurationError::NegativeValue { name, value: self.min });
        }
        if self.min > self.max {
            return Err(ConfigurationError::InvalidRange { name, min: self.min, max: self.max });
        }
        Ok(())
    }

    /// Draw a value from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Axis-aligned box spawn positions are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnArea {
    /// Centre of the box
    pub center: Vec3,
    /// Half size along each axis; zero pins that axis to the centre
    pub half_extents: Vec3,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 100.0, 0.0),
            half_extents: Vec3::new(50.0, 0.0, 50.0),
        }
    }
}

impl SpawnArea {
    /// A single spawn point
    pub fn point(center: Vec3) -> Self {
        Self { center, half_extents: Vec3::zeros() }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if !math::is_finite(&self.center) || !math::is_finite(&self.half_extents) {
            return Err(ConfigurationError::NonFinite { name: "spawn_area" });
        }
        if let Some(negative) = self.half_extents.iter().find(|h| **h < 0.0) {
            return Err(ConfigurationError::NegativeValue {
                name: "spawn_area.half_extents",
                value: *negative,
            });
        }
        Ok(())
    }

    /// Draw a position inside the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let offset = self.half_extents.map(|h| if h > 0.0 { rng.gen_range(-h..=h) } else { 0.0 });
        self.center + offset
    }
}

/// Everything needed to run one shower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowerConfig {
    /// Seconds the shower runs; `0` runs until stopped
    pub total_duration: f32,
    /// Shortest gap between spawn attempts
    pub min_interval: f32,
    /// Longest gap between spawn attempts
    pub max_interval: f32,
    /// Travel direction, normalized on start
    pub direction: Vec3,
    /// Seed for reproducible showers; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Travel speed in units per second
    pub speed: FloatRange,
    /// Uniform scale
    pub size: FloatRange,
    /// Item lifetime in seconds; `0` relies on the kill boundary alone
    pub lifetime: FloatRange,
    /// Where items appear
    pub spawn_area: SpawnArea,
    /// Colours picked uniformly per spawn
    pub colors: Vec<Color>,
}

impl Default for ShowerConfig {
    fn default() -> Self {
        Self {
            total_duration: 30.0,
            min_interval: 0.2,
            max_interval: 0.8,
            speed: FloatRange::new(20.0, 40.0),
            size: FloatRange::new(0.5, 2.0),
            lifetime: FloatRange::new(3.0, 6.0),
            colors: vec![
                Color::WHITE,
                Color::rgb(1.0, 0.6, 0.2),
                Color::rgb(0.6, 0.8, 1.0),
            ],
            spawn_area: SpawnArea::default(),
            direction: Vec3::new(-0.3, -1.0, 0.2),
            seed: None,
        }
    }
}

impl ShowerConfig {
    /// Whether the shower stops by itself
    pub fn is_bounded(&self) -> bool {
        self.total_duration > 0.0
    }

    /// Spawn interval bounds as a range
    pub fn interval_range(&self) -> FloatRange {
        FloatRange::new(self.min_interval, self.max_interval)
    }

    /// Unit travel direction, `None` if the configured vector is degenerate
    pub fn unit_direction(&self) -> Option<Vec3> {
        math::try_direction(self.direction)
    }
}

impl Config for ShowerConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.total_duration.is_finite() {
            return Err(ConfigurationError::NonFinite { name: "total_duration" });
        }
        if self.total_duration < 0.0 {
            return Err(ConfigurationError::NegativeValue {
                name: "total_duration",
                value: self.total_duration,
            });
        }

        self.interval_range().validate("interval", false)?;
        self.speed.validate("speed", false)?;
        self.size.validate("size", false)?;
        self.lifetime.validate("lifetime", false)?;
        self.spawn_area.validate()?;

        if self.colors.is_empty() {
            return Err(ConfigurationError::EmptyColorSet);
        }
        if self.unit_direction().is_none() {
            return Err(ConfigurationError::ZeroDirection);
        }
        Ok(())
    }
}
