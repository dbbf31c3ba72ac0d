//! Static world geometry: bounds, safe zone, obstacles and cosmetic paths.
//!
//! The world is generated once per session. Obstacles are solid for the
//! collision resolver; paths are only consulted by the renderer.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::config::WorldConfig;
use crate::error::PlacementExhausted;
use crate::geometry::{Aabb, BoundingShape, Circle, SolidBody};
use crate::{HOUSE_HEIGHT, HOUSE_WIDTH, TILE};

/// Village house offsets from the spawn point, in tiles.
const HOUSE_OFFSETS: [(f32, f32); 4] = [(-10.0, -8.0), (12.0, 12.0), (-20.0, 18.0), (24.0, -14.0)];

/// Circular region around the spawn point that hostile actors avoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeZone {
    /// Centre, which is also the player spawn point.
    pub center: Vec2,
    /// Radius of the protected area.
    pub radius: f32,
    /// Width of the repulsion band beyond the radius.
    pub margin: f32,
}

impl SafeZone {
    /// Whether `point` lies inside the protected area.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Whether `point` lies inside the radius plus the repulsion margin.
    #[must_use]
    pub fn repels(&self, point: Vec2) -> bool {
        self.center.distance(point) < self.radius + self.margin
    }
}

/// Visual category of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObstacleKind {
    /// Village building.
    House,
    /// Tree or bush.
    Tree,
    /// Boulder.
    Rock,
}

/// A solid piece of scenery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// What to draw.
    pub kind: ObstacleKind,
    /// Collision body.
    pub body: SolidBody,
}

/// Surface drawn along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathSurface {
    /// Packed earth.
    Dirt,
    /// Cobblestone.
    Stone,
}

/// Cosmetic polyline with a fixed stroke width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Surface drawn along the path.
    pub surface: PathSurface,
    /// Ordered points of the polyline.
    pub points: Vec<Vec2>,
    /// Stroke width in world units.
    pub width: f32,
}

/// Shape parameters for a generated sinusoidal path.
struct PathSpec {
    surface: PathSurface,
    start_fraction: Vec2,
    len: usize,
    step_tiles: f32,
    amplitude_tiles: f32,
    wavelength: f32,
}

const PATH_SPECS: [PathSpec; 2] = [
    PathSpec {
        surface: PathSurface::Dirt,
        start_fraction: Vec2::new(0.12, 0.35),
        len: 200,
        step_tiles: 1.1,
        amplitude_tiles: 2.4,
        wavelength: 0.16,
    },
    PathSpec {
        surface: PathSurface::Stone,
        start_fraction: Vec2::new(0.08, 0.65),
        len: 220,
        step_tiles: 1.0,
        amplitude_tiles: 2.0,
        wavelength: 0.12,
    },
];

/// The static playing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    size: Vec2,
    spawn: Vec2,
    safe_zone: SafeZone,
    obstacles: Vec<Obstacle>,
    paths: Vec<Path>,
}

impl World {
    /// Creates an empty world whose safe zone is centred on the middle.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use wildlands::world::World;
    ///
    /// let world = World::empty(Vec2::new(100.0, 50.0), 10.0, 2.0);
    /// assert!(world.is_in_safe_zone(Vec2::new(55.0, 25.0)));
    /// assert!(!world.is_solid_at(Vec2::new(55.0, 25.0)));
    /// ```
    #[must_use]
    pub fn empty(size: Vec2, safe_radius: f32, safe_margin: f32) -> Self {
        let spawn = size * 0.5;
        Self {
            size,
            spawn,
            safe_zone: SafeZone {
                center: spawn,
                radius: safe_radius,
                margin: safe_margin,
            },
            obstacles: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Generates the session world: village houses, scattered trees and
    /// rocks, and the cosmetic paths.
    ///
    /// Random scenery never lands within the configured fraction of the safe
    /// radius and never covers the spawn point. A placement that keeps
    /// failing is skipped after `placement_attempts` tries.
    pub fn generate<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Self {
        let mut world = Self::empty(config.size(), config.safe_zone_radius, config.safe_zone_margin);
        let spawn_clearance = SolidBody::Circle(Circle::new(world.spawn, TILE));

        if config.place_houses {
            for (dx, dy) in HOUSE_OFFSETS {
                let center = world.spawn + Vec2::new(dx, dy) * TILE;
                let body = SolidBody::Rect(Aabb::from_center_size(
                    center,
                    Vec2::new(HOUSE_WIDTH, HOUSE_HEIGHT),
                ));
                if body.overlaps(&spawn_clearance) {
                    warn!("skipping house at {center:?}: it would cover the spawn point");
                    continue;
                }
                world.add_obstacle(ObstacleKind::House, body);
            }
        }

        let exclusion = config.safe_zone_radius * config.scenery_exclusion_fraction;
        let mut skipped = 0_usize;
        for (kind, count, radius) in [
            (ObstacleKind::Tree, config.tree_count, config.tree_radius),
            (ObstacleKind::Rock, config.rock_count, config.rock_radius),
        ] {
            for _ in 0..count {
                match world.scatter_one(rng, radius, exclusion, &spawn_clearance, config.placement_attempts) {
                    Ok(body) => world.add_obstacle(kind, body),
                    Err(err) => {
                        debug!("{kind:?} skipped: {err}");
                        skipped += 1;
                    }
                }
            }
        }
        if skipped > 0 {
            warn!("{skipped} scenery placements exhausted their attempts");
        }

        if config.generate_paths {
            for spec in &PATH_SPECS {
                world.paths.push(sinusoidal_path(spec, world.size, config.path_width));
            }
        }

        info!(
            "generated {}x{} world with {} obstacles and {} paths",
            world.size.x,
            world.size.y,
            world.obstacles.len(),
            world.paths.len()
        );
        world
    }

    fn scatter_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        radius: f32,
        exclusion: f32,
        spawn_clearance: &SolidBody,
        attempts: u32,
    ) -> Result<SolidBody, PlacementExhausted> {
        for _ in 0..attempts {
            let point = self.random_point(rng, 0.0);
            if point.distance(self.spawn) < exclusion {
                continue;
            }
            let body = SolidBody::Circle(Circle::new(point, radius));
            if body.overlaps(spawn_clearance) {
                continue;
            }
            return Ok(body);
        }
        Err(PlacementExhausted { attempts })
    }

    /// Adds a solid obstacle.
    pub fn add_obstacle(&mut self, kind: ObstacleKind, body: SolidBody) {
        self.obstacles.push(Obstacle { kind, body });
    }

    /// Adds a cosmetic path.
    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// World dimensions.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Player spawn point.
    #[must_use]
    pub const fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// The protected area around the spawn.
    #[must_use]
    pub const fn safe_zone(&self) -> &SafeZone {
        &self.safe_zone
    }

    /// All solid scenery.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// All cosmetic paths.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Whether any obstacle contains `point`.
    #[must_use]
    pub fn is_solid_at(&self, point: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.body.contains(point))
    }

    /// Whether `point` lies inside the safe zone.
    #[must_use]
    pub fn is_in_safe_zone(&self, point: Vec2) -> bool {
        self.safe_zone.contains(point)
    }

    /// Clamps `point` into `[0, width] × [0, height]`.
    #[must_use]
    pub fn clamp_to_bounds(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, self.size)
    }

    /// Clamps `point` into the world shrunk by `inset` on every side.
    ///
    /// An inset larger than half the world pins that axis to its centre.
    #[must_use]
    pub fn clamp_with_inset(&self, point: Vec2, inset: f32) -> Vec2 {
        let half = self.size * 0.5;
        let lo = Vec2::splat(inset.max(0.0)).min(half);
        let hi = (self.size - lo).max(half);
        point.clamp(lo, hi)
    }

    /// Whether `body` overlaps any obstacle.
    #[must_use]
    pub fn collides(&self, body: &SolidBody) -> bool {
        self.obstacles.iter().any(|o| o.body.overlaps(body))
    }

    /// Picks a random point farther than `min_safe_distance` from the safe
    /// centre where `footprint` does not overlap any obstacle.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementExhausted`] when `attempts` candidates all fail.
    pub fn random_open_point<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_safe_distance: f32,
        footprint: BoundingShape,
        inset: f32,
        attempts: u32,
    ) -> Result<Vec2, PlacementExhausted> {
        for _ in 0..attempts {
            let point = self.random_point(rng, inset);
            if self.safe_zone.center.distance(point) <= min_safe_distance {
                continue;
            }
            if self.collides(&footprint.at(point)) {
                continue;
            }
            return Ok(point);
        }
        Err(PlacementExhausted { attempts })
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R, inset: f32) -> Vec2 {
        let lo = self.clamp_with_inset(Vec2::ZERO, inset);
        let hi = self.clamp_with_inset(self.size, inset);
        Vec2::new(sample_axis(rng, lo.x, hi.x), sample_axis(rng, lo.y, hi.y))
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

fn sinusoidal_path(spec: &PathSpec, world_size: Vec2, width: f32) -> Path {
    let mut cursor = spec.start_fraction * world_size;
    let amplitude = spec.amplitude_tiles * TILE;
    let mut points = Vec::with_capacity(spec.len);
    for i in 0..spec.len {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Path indices are a few hundred at most."
        )]
        let phase = i as f32 * spec.wavelength;
        cursor.x += spec.step_tiles * TILE;
        cursor.y += phase.sin() * amplitude + (phase * 0.5).cos() * amplitude * 0.3;
        points.push(cursor);
    }
    Path {
        surface: spec.surface,
        points,
        width,
    }
}
