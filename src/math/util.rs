use super::Vector2d;
use cgmath::prelude::*;

/// Rotates a vector 90 degrees counter-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Normalises a vector, or returns `None` if it has no length to normalise.
pub fn try_normalize(vec: Vector2d) -> Option<Vector2d> {
    let mag = vec.magnitude();
    if mag > 0.0 && mag.is_finite() {
        Some(vec / mag)
    } else {
        None
    }
}
