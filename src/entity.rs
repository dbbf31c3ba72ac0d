//! Actors living in the world and the capabilities they expose.
//!
//! Each kind carries only the fields it needs. Code that treats actors
//! uniformly (draw ordering, proximity queries) goes through [`EntityRef`]
//! and the capability traits instead of inspecting kinds directly.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::config::{MonsterConfig, PlayerConfig};
use crate::economy::Purse;
use crate::geometry::{BoundingShape, SolidBody};
use crate::vendor::Vendor;
use crate::PLAYER_IDLE_FRAME;

/// Anything with a world position.
pub trait HasPosition {
    /// Centre of the actor in world units.
    fn position(&self) -> Vec2;
}

/// Actors that occupy space and collide with scenery.
pub trait Solid: HasPosition {
    /// Footprint centred on the actor.
    fn footprint(&self) -> BoundingShape;

    /// Footprint placed at the current position.
    fn body(&self) -> SolidBody {
        self.footprint().at(self.position())
    }
}

/// Actors that can be hurt and killed.
pub trait Damageable {
    /// Remaining hit points.
    fn hp(&self) -> u32;

    /// Removes `amount` hit points, returning `true` when this kills.
    fn apply_damage(&mut self, amount: u32) -> bool;

    /// Whether any hit points remain.
    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}

/// Cardinal facing of the player sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    #[default]
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Facing {
    /// Unit vector for this facing in world space.
    #[must_use]
    pub const fn as_vec(self) -> Vec2 {
        match self {
            Self::Up => Vec2::NEG_Y,
            Self::Down => Vec2::Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
        }
    }
}

/// The player-controlled avatar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Centre of the avatar.
    pub position: Vec2,
    /// Velocity requested this tick.
    pub velocity: Vec2,
    /// Sprite facing.
    pub facing: Facing,
    /// Footprint width and height.
    pub size: Vec2,
    /// Walking speed.
    pub speed: f32,
    /// Distance kept from the world edge.
    pub bounds_inset: f32,
    /// Seconds until the next swing may start.
    pub attack_cooldown: f32,
    /// Seconds the current swing remains visible.
    pub swing_timer: f32,
    /// Walk-cycle animation phase in frames.
    pub anim_phase: f32,
    /// Coins and owned equipment.
    pub purse: Purse,
}

impl Player {
    /// Creates the avatar at `position`.
    #[must_use]
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            size: Vec2::new(config.width, config.height),
            speed: config.speed,
            bounds_inset: config.bounds_inset,
            attack_cooldown: 0.0,
            swing_timer: 0.0,
            anim_phase: PLAYER_IDLE_FRAME,
            purse: Purse::new(config.starting_coins),
        }
    }

    /// Whether a swing is currently visible.
    #[must_use]
    pub const fn is_swinging(&self) -> bool {
        self.swing_timer > 0.0
    }
}

impl HasPosition for Player {
    fn position(&self) -> Vec2 {
        self.position
    }
}

impl Solid for Player {
    fn footprint(&self) -> BoundingShape {
        BoundingShape::Rect { size: self.size }
    }
}

/// Stable identifier of a monster across its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonsterId(pub u64);

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monster#{}", self.0)
    }
}

/// Behavioural state of a monster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AggroState {
    /// Spawned but not yet updated.
    #[default]
    Idle,
    /// Drifting with the noise field.
    Wandering,
    /// Drawn towards the player.
    Pursuing,
}

/// A hostile wandering creature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Monster {
    /// Stable identifier.
    pub id: MonsterId,
    /// Centre of the monster.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Remaining hit points.
    pub hp: u32,
    /// Per-monster time offset into the noise field, in seconds.
    pub wander_phase: f32,
    /// Speed cap.
    pub max_speed: f32,
    /// Collision radius.
    pub radius: f32,
    /// Behavioural state.
    pub aggro: AggroState,
}

impl Monster {
    /// Creates a monster with a random speed cap and wander phase.
    pub fn spawn<R: Rng + ?Sized>(
        id: MonsterId,
        position: Vec2,
        config: &MonsterConfig,
        rng: &mut R,
    ) -> Self {
        let max_speed = if config.max_speed > config.min_speed {
            rng.gen_range(config.min_speed..config.max_speed)
        } else {
            config.min_speed
        };
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            hp: config.hp,
            wander_phase: rng.gen_range(0.0..1000.0),
            max_speed,
            radius: config.radius,
            aggro: AggroState::Idle,
        }
    }
}

impl HasPosition for Monster {
    fn position(&self) -> Vec2 {
        self.position
    }
}

impl Solid for Monster {
    fn footprint(&self) -> BoundingShape {
        BoundingShape::Circle {
            radius: self.radius,
        }
    }
}

impl Damageable for Monster {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn apply_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.hp > 0;
        self.hp = self.hp.saturating_sub(amount);
        was_alive && self.hp == 0
    }
}

/// Discriminant of [`EntityRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    /// The avatar.
    Player,
    /// A hostile creature.
    Monster,
    /// The blacksmith.
    Vendor,
}

/// Borrowed view over any actor.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    /// The avatar.
    Player(&'a Player),
    /// A hostile creature.
    Monster(&'a Monster),
    /// The blacksmith.
    Vendor(&'a Vendor),
}

impl EntityRef<'_> {
    /// Which kind of actor this is.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Monster(_) => EntityKind::Monster,
            Self::Vendor(_) => EntityKind::Vendor,
        }
    }

    /// Footprint for actors that collide with scenery.
    #[must_use]
    pub fn footprint(&self) -> Option<BoundingShape> {
        match self {
            Self::Player(player) => Some(player.footprint()),
            Self::Monster(monster) => Some(monster.footprint()),
            Self::Vendor(_) => None,
        }
    }

    /// Whether the actor is solid.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.footprint().is_some()
    }

    /// Hit points for actors that can be damaged.
    #[must_use]
    pub fn hp(&self) -> Option<u32> {
        match self {
            Self::Monster(monster) => Some(monster.hp()),
            Self::Player(_) | Self::Vendor(_) => None,
        }
    }

    /// Whether the actor can be damaged.
    #[must_use]
    pub fn is_damageable(&self) -> bool {
        self.hp().is_some()
    }
}

impl HasPosition for EntityRef<'_> {
    fn position(&self) -> Vec2 {
        match self {
            Self::Player(player) => player.position(),
            Self::Monster(monster) => monster.position(),
            Self::Vendor(vendor) => vendor.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[test]
    fn monster_dies_exactly_once() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut monster = Monster::spawn(MonsterId(1), Vec2::ZERO, &config.monsters, &mut rng);
        assert!(!monster.apply_damage(1));
        assert!(!monster.apply_damage(1));
        assert!(monster.apply_damage(1));
        assert!(!monster.apply_damage(1));
        assert!(!monster.is_alive());
    }

    #[test]
    fn spawned_speed_is_within_configured_range() {
        let config = SimulationConfig::default().monsters;
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for i in 0..100 {
            let monster = Monster::spawn(MonsterId(i), Vec2::ZERO, &config, &mut rng);
            assert!(monster.max_speed >= config.min_speed && monster.max_speed < config.max_speed);
            assert_eq!(monster.aggro, AggroState::Idle);
            assert_eq!(monster.hp, config.hp);
        }
    }

    #[rstest]
    #[case(Facing::Up, Vec2::new(0.0, -1.0))]
    #[case(Facing::Down, Vec2::new(0.0, 1.0))]
    #[case(Facing::Left, Vec2::new(-1.0, 0.0))]
    #[case(Facing::Right, Vec2::new(1.0, 0.0))]
    fn facing_vectors(#[case] facing: Facing, #[case] expected: Vec2) {
        assert_eq!(facing.as_vec(), expected);
    }

    #[test]
    fn entity_refs_expose_capabilities() {
        let config = SimulationConfig::default();
        let player = Player::new(Vec2::new(1.0, 2.0), &config.player);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let monster = Monster::spawn(MonsterId(4), Vec2::new(5.0, 5.0), &config.monsters, &mut rng);
        let vendor = Vendor::new(Vec2::new(9.0, 9.0), &config.vendor);

        let refs = [
            EntityRef::Player(&player),
            EntityRef::Monster(&monster),
            EntityRef::Vendor(&vendor),
        ];
        let solid: Vec<_> = refs.iter().map(EntityRef::is_solid).collect();
        let damageable: Vec<_> = refs.iter().map(EntityRef::is_damageable).collect();
        assert_eq!(solid, vec![true, true, false]);
        assert_eq!(damageable, vec![false, true, false]);
        assert_eq!(refs[2].position(), Vec2::new(9.0, 9.0));
    }
}
