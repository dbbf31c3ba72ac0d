//! Movement against static world geometry.
//!
//! [`try_move`] clamps a proposed displacement to the world bounds and, when
//! the result would overlap an obstacle, falls back to testing each axis on
//! its own so entities slide along walls instead of stopping dead.

use glam::Vec2;
use log::trace;

use crate::geometry::BoundingShape;
use crate::world::World;

/// A moving body: position plus footprint plus edge inset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    /// Centre of the body.
    pub position: Vec2,
    /// Footprint tested against obstacles.
    pub shape: BoundingShape,
    /// Distance kept from the world edge.
    pub inset: f32,
}

/// Attempts to move `mover` by `delta`, returning the displacement applied.
///
/// The candidate position is clamped to the world minus the inset. If it
/// collides, the horizontal and vertical sub-moves are tried independently;
/// when both are free on their own but not together, the horizontal one
/// wins. `mover.position` changes only when some movement is allowed, and
/// the resulting footprint never overlaps an obstacle.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::collision::{try_move, Mover};
/// use wildlands::geometry::{Aabb, BoundingShape, SolidBody};
/// use wildlands::world::{ObstacleKind, World};
///
/// let mut world = World::empty(Vec2::new(100.0, 100.0), 5.0, 0.0);
/// world.add_obstacle(
///     ObstacleKind::House,
///     SolidBody::Rect(Aabb::from_corner_size(Vec2::new(20.0, 0.0), Vec2::new(10.0, 100.0))),
/// );
/// let mut mover = Mover {
///     position: Vec2::new(14.0, 50.0),
///     shape: BoundingShape::Circle { radius: 4.0 },
///     inset: 0.0,
/// };
/// // Walking diagonally into the wall slides along it.
/// let applied = try_move(&world, &mut mover, Vec2::new(5.0, 5.0));
/// assert_eq!(applied, Vec2::new(0.0, 5.0));
/// ```
pub fn try_move(world: &World, mover: &mut Mover, delta: Vec2) -> Vec2 {
    if !delta.is_finite() || delta == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let start = mover.position;
    let free = |candidate: Vec2| !world.collides(&mover.shape.at(candidate));
    let clamp = |candidate: Vec2| world.clamp_with_inset(candidate, mover.inset);

    let full = clamp(start + delta);
    let target = if free(full) {
        Some(full)
    } else {
        let horizontal = clamp(Vec2::new(start.x + delta.x, start.y));
        let vertical = clamp(Vec2::new(start.x, start.y + delta.y));
        let x_ok = delta.x != 0.0 && free(horizontal);
        let y_ok = delta.y != 0.0 && free(vertical);
        trace!("axis split at {start:?}: x_ok={x_ok} y_ok={y_ok}");
        match (x_ok, y_ok) {
            (true, true) => {
                let both = clamp(Vec2::new(horizontal.x, vertical.y));
                Some(if free(both) { both } else { horizontal })
            }
            (true, false) => Some(horizontal),
            (false, true) => Some(vertical),
            (false, false) => None,
        }
    };

    match target {
        Some(position) if position != start => {
            mover.position = position;
            position - start
        }
        _ => Vec2::ZERO,
    }
}
