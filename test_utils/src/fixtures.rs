//! Convenience constructors for worlds and actors used in tests.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wildlands::config::{MonsterConfig, SimulationConfig};
use wildlands::entity::{Monster, MonsterId};
use wildlands::geometry::{Aabb, Circle, SolidBody};
use wildlands::world::{ObstacleKind, World};

/// Builder for hand-made worlds with a centred safe zone.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::fixtures::WorldBuilder;
///
/// let world = WorldBuilder::new(Vec2::new(400.0, 400.0))
///     .safe_zone(50.0, 10.0)
///     .rock(Vec2::new(300.0, 300.0), 12.0)
///     .build();
/// assert!(world.is_solid_at(Vec2::new(300.0, 305.0)));
/// ```
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    size: Vec2,
    safe_radius: f32,
    safe_margin: f32,
    obstacles: Vec<(ObstacleKind, SolidBody)>,
}

impl WorldBuilder {
    /// Starts an empty world of `size` with a 64-unit safe zone.
    #[must_use]
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            safe_radius: 64.0,
            safe_margin: 24.0,
            obstacles: Vec::new(),
        }
    }

    /// Sets the safe-zone radius and repulsion margin.
    #[must_use]
    pub fn safe_zone(mut self, radius: f32, margin: f32) -> Self {
        self.safe_radius = radius;
        self.safe_margin = margin;
        self
    }

    /// Adds a house occupying the rectangle at `corner` of `size`.
    #[must_use]
    pub fn house(mut self, corner: Vec2, size: Vec2) -> Self {
        self.obstacles.push((
            ObstacleKind::House,
            SolidBody::Rect(Aabb::from_corner_size(corner, size)),
        ));
        self
    }

    /// Adds a tree at `center`.
    #[must_use]
    pub fn tree(mut self, center: Vec2, radius: f32) -> Self {
        self.obstacles
            .push((ObstacleKind::Tree, SolidBody::Circle(Circle::new(center, radius))));
        self
    }

    /// Adds a rock at `center`.
    #[must_use]
    pub fn rock(mut self, center: Vec2, radius: f32) -> Self {
        self.obstacles
            .push((ObstacleKind::Rock, SolidBody::Circle(Circle::new(center, radius))));
        self
    }

    /// Builds the world.
    #[must_use]
    pub fn build(self) -> World {
        let mut world = World::empty(self.size, self.safe_radius, self.safe_margin);
        for (kind, body) in self.obstacles {
            world.add_obstacle(kind, body);
        }
        world
    }
}

/// A monster at `position` with default stats and a fixed random stream.
#[must_use]
pub fn monster_at(id: u64, position: Vec2) -> Monster {
    monster_with(id, position, &MonsterConfig::default())
}

/// A monster at `position` built from `config`.
#[must_use]
pub fn monster_with(id: u64, position: Vec2, config: &MonsterConfig) -> Monster {
    let mut rng = ChaCha8Rng::seed_from_u64(id);
    Monster::spawn(MonsterId(id), position, config, &mut rng)
}

/// A configuration with a smaller, sparser world that is quick to generate.
#[must_use]
pub fn small_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.width = 3_200.0;
    config.world.height = 2_400.0;
    config.world.tree_count = 40;
    config.world.rock_count = 10;
    config.monsters.count = 20;
    config
}
