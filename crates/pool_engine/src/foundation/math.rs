//! Math utilities and types
//!
//! Thin aliases over nalgebra for the vector types used by pooled items.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Vectors shorter than this cannot be normalized
pub const NORMALIZE_EPSILON: f32 = 1.0e-6;

/// Normalize a direction, returning `None` for zero-length or non-finite input
pub fn try_direction(v: Vec3) -> Option<Vec3> {
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }
    v.try_normalize(NORMALIZE_EPSILON)
}

/// Check that every component of a vector is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_try_direction_normalizes() {
        let dir = try_direction(Vec3::new(0.0, -3.0, 4.0)).expect("non-zero vector");
        assert_relative_eq!(dir.norm(), 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(dir.y, -0.6, epsilon = 1.0e-6);
    }

    #[test]
    fn test_try_direction_rejects_degenerate() {
        assert!(try_direction(Vec3::zeros()).is_none());
        assert!(try_direction(Vec3::new(f32::NAN, 1.0, 0.0)).is_none());
    }
}
