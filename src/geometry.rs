//! Solid shapes and their overlap predicates.
//!
//! World geometry and entity footprints are both expressed as
//! [`SolidBody`] values so a single predicate answers every collision
//! question. Touching edges do not count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner (world y grows downward).
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Builds a rectangle centred on `center` with the given full `size`.
    #[must_use]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Builds a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_corner_size(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size.abs(),
        }
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Closest point of the rectangle to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    const fn overlaps_aabb(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Circle described by centre and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre point.
    pub center: Vec2,
    /// Radius in world units.
    pub radius: f32,
}

impl Circle {
    /// Creates a circle.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// A positioned solid shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolidBody {
    /// Axis-aligned rectangle, used for houses and the player footprint.
    Rect(Aabb),
    /// Circle, used for trees, rocks and monsters.
    Circle(Circle),
}

impl SolidBody {
    /// Whether `point` lies within the body.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(point),
            Self::Circle(circle) => circle.contains(point),
        }
    }

    /// Whether the interiors of two bodies intersect.
    ///
    /// Circles collide when their centre distance is less than the combined
    /// radius; a rectangle and a circle collide when the rectangle's closest
    /// point to the circle centre lies strictly inside the circle.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use wildlands::geometry::{Aabb, Circle, SolidBody};
    ///
    /// let wall = SolidBody::Rect(Aabb::from_corner_size(Vec2::ZERO, Vec2::splat(10.0)));
    /// let near = SolidBody::Circle(Circle::new(Vec2::new(12.0, 5.0), 3.0));
    /// let far = SolidBody::Circle(Circle::new(Vec2::new(14.0, 5.0), 3.0));
    /// assert!(wall.overlaps(&near));
    /// assert!(!wall.overlaps(&far));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => a.overlaps_aabb(b),
            (Self::Circle(a), Self::Circle(b)) => {
                let reach = a.radius + b.radius;
                a.center.distance_squared(b.center) < reach * reach
            }
            (Self::Rect(rect), Self::Circle(circle)) | (Self::Circle(circle), Self::Rect(rect)) => {
                let closest = rect.closest_point(circle.center);
                closest.distance_squared(circle.center) < circle.radius * circle.radius
            }
        }
    }

    /// Y coordinate used for depth sorting: the bottom edge of the body.
    #[must_use]
    pub const fn base_y(&self) -> f32 {
        match self {
            Self::Rect(rect) => rect.max.y,
            Self::Circle(circle) => circle.center.y,
        }
    }
}

/// An entity footprint that can be placed at any position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundingShape {
    /// Rectangle of the given full size centred on the entity.
    Rect {
        /// Width and height.
        size: Vec2,
    },
    /// Circle of the given radius centred on the entity.
    Circle {
        /// Radius in world units.
        radius: f32,
    },
}

impl BoundingShape {
    /// The footprint placed with its centre at `position`.
    #[must_use]
    pub fn at(&self, position: Vec2) -> SolidBody {
        match *self {
            Self::Rect { size } => SolidBody::Rect(Aabb::from_center_size(position, size)),
            Self::Circle { radius } => SolidBody::Circle(Circle::new(position, radius)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> SolidBody {
        SolidBody::Rect(Aabb::from_corner_size(Vec2::new(x, y), Vec2::new(w, h)))
    }

    const fn circle(x: f32, y: f32, r: f32) -> SolidBody {
        SolidBody::Circle(Circle::new(Vec2::new(x, y), r))
    }

    #[rstest]
    #[case::separate(rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 5.0, 5.0), false)]
    #[case::touching_edges(rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 5.0, 5.0), false)]
    #[case::overlapping(rect(0.0, 0.0, 10.0, 10.0), rect(9.0, 9.0, 5.0, 5.0), true)]
    #[case::nested(rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 1.0, 1.0), true)]
    #[case::circles_apart(circle(0.0, 0.0, 5.0), circle(10.0, 0.0, 5.0), false)]
    #[case::circles_overlap(circle(0.0, 0.0, 5.0), circle(9.0, 0.0, 5.0), true)]
    #[case::rect_circle_corner_gap(rect(0.0, 0.0, 10.0, 10.0), circle(13.0, 13.0, 4.0), false)]
    #[case::rect_circle_side(rect(0.0, 0.0, 10.0, 10.0), circle(12.0, 5.0, 3.0), true)]
    #[case::circle_inside_rect(rect(0.0, 0.0, 10.0, 10.0), circle(5.0, 5.0, 1.0), true)]
    fn overlap_is_symmetric(#[case] a: SolidBody, #[case] b: SolidBody, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[test]
    fn bounding_rect_is_centred() {
        let body = BoundingShape::Rect {
            size: Vec2::new(20.0, 26.0),
        }
        .at(Vec2::new(100.0, 100.0));
        let SolidBody::Rect(rect) = body else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.min, Vec2::new(90.0, 87.0));
        assert_eq!(rect.max, Vec2::new(110.0, 113.0));
        assert_eq!(rect.center(), Vec2::new(100.0, 100.0));
    }

    #[rstest]
    #[case(Vec2::new(5.0, 5.0), true)]
    #[case(Vec2::new(10.0, 10.0), true)]
    #[case(Vec2::new(10.1, 5.0), false)]
    fn rect_contains_boundary(#[case] point: Vec2, #[case] expected: bool) {
        assert_eq!(rect(0.0, 0.0, 10.0, 10.0).contains(point), expected);
    }
}
