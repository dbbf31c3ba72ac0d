//! Camera that follows the player and maps world to screen coordinates.
//!
//! The camera is recomputed every tick from the player position. Its origin
//! is the world coordinate shown at the top-left of the viewport and never
//! lets the viewport show anything outside the world.

use glam::Vec2;
use serde::Serialize;

/// Viewport origin and size in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// World coordinate at the viewport's top-left corner.
    pub origin: Vec2,
    /// Viewport width and height.
    pub viewport: Vec2,
}

impl Camera {
    /// Creates a camera at the world origin.
    #[must_use]
    pub const fn new(viewport: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            viewport,
        }
    }

    /// Centres the viewport on `target`, clamped to the world.
    ///
    /// On an axis where the viewport is larger than the world the origin is
    /// pinned to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use wildlands::camera::Camera;
    ///
    /// let world = Vec2::new(1000.0, 300.0);
    /// let camera = Camera::follow(Vec2::new(990.0, 150.0), Vec2::new(200.0, 400.0), world);
    /// assert_eq!(camera.origin, Vec2::new(800.0, 0.0));
    /// ```
    #[must_use]
    pub fn follow(target: Vec2, viewport: Vec2, world_size: Vec2) -> Self {
        let desired = target - viewport * 0.5;
        let max_origin = (world_size - viewport).max(Vec2::ZERO);
        let origin = if desired.is_finite() {
            desired.clamp(Vec2::ZERO, max_origin)
        } else {
            Vec2::ZERO
        };
        Self { origin, viewport }
    }

    /// Converts a world position to viewport coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.origin
    }

    /// Converts a viewport position (for example the mouse) to world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.origin
    }

    /// Whether a world-space circle is at least partly inside the viewport.
    #[must_use]
    pub fn is_visible(&self, world: Vec2, radius: f32) -> bool {
        let screen = self.world_to_screen(world);
        screen.x + radius >= 0.0
            && screen.y + radius >= 0.0
            && screen.x - radius <= self.viewport.x
            && screen.y - radius <= self.viewport.y
    }
}
