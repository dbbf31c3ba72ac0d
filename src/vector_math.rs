//! Basic vector math helper functions.
//! Guarded normalisation so force terms can skip degenerate directions.
use glam::Vec2;

/// Lengths below this are treated as the zero vector.
const MIN_LENGTH: f32 = 1e-6;

/// Returns the unit vector pointing from `from` towards `to`.
///
/// Returns `None` when the points coincide or any component is not finite,
/// letting callers drop the force term instead of dividing by zero.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use wildlands::vector_math::try_direction;
///
/// let dir = try_direction(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
/// assert!((dir.x - 0.6).abs() < 1e-6);
/// assert!((dir.y - 0.8).abs() < 1e-6);
/// assert!(try_direction(Vec2::ONE, Vec2::ONE).is_none());
/// ```
#[must_use]
pub fn try_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    vec_normalize(to - from)
}

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite input and vectors shorter than a small epsilon yield `None`.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::vec_normalize;
///
/// let unit = vec_normalize(Vec2::new(0.0, -2.0)).unwrap();
/// assert_eq!(unit, Vec2::new(0.0, -1.0));
/// assert!(vec_normalize(Vec2::ZERO).is_none());
/// ```
#[must_use]
pub fn vec_normalize(vector: Vec2) -> Option<Vec2> {
    if !vector.is_finite() || vector.length() < MIN_LENGTH {
        return None;
    }
    Some(vector / vector.length())
}

/// Scales `vector` down so its length does not exceed `max`.
///
/// Vectors already within the limit are returned unchanged; a non-positive
/// `max` yields the zero vector.
#[must_use]
pub fn clamp_length(vector: Vec2, max: f32) -> Vec2 {
    if max <= 0.0 {
        return Vec2::ZERO;
    }
    let length = vector.length();
    if length > max {
        vector * (max / length)
    } else {
        vector
    }
}
