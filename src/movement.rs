//! Player movement: intent to velocity, collision and facing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{try_move, Mover};
use crate::entity::{Facing, Player, Solid};
use crate::world::World;
use crate::{PLAYER_ANIM_RATE, PLAYER_IDLE_FRAME};

/// Frames in one walk cycle of the player sprite.
const WALK_FRAMES: f32 = 3.0;

/// How the player's facing is chosen each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacingPolicy {
    /// Face along the dominant axis of the movement intent.
    DominantInput,
    /// Face towards the pointer, falling back to the movement intent when
    /// no pointer is available.
    #[default]
    Pointer,
}

/// Facing for a direction vector; `None` for the zero vector.
///
/// The larger component decides; horizontal wins ties. World y grows
/// downward, so a positive y component faces [`Facing::Down`].
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::entity::Facing;
/// use wildlands::movement::dominant_facing;
///
/// assert_eq!(dominant_facing(Vec2::new(0.5, -0.9)), Some(Facing::Up));
/// assert_eq!(dominant_facing(Vec2::new(-1.0, 1.0)), Some(Facing::Left));
/// assert_eq!(dominant_facing(Vec2::ZERO), None);
/// ```
#[must_use]
pub fn dominant_facing(direction: Vec2) -> Option<Facing> {
    if !direction.is_finite() || direction == Vec2::ZERO {
        return None;
    }
    let facing = if direction.x.abs() >= direction.y.abs() {
        if direction.x > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if direction.y > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    };
    Some(facing)
}

/// Chooses the facing for this tick, or `None` to keep the previous one.
#[must_use]
pub fn choose_facing(
    policy: FacingPolicy,
    position: Vec2,
    direction: Vec2,
    pointer_world: Option<Vec2>,
) -> Option<Facing> {
    match (policy, pointer_world) {
        (FacingPolicy::Pointer, Some(pointer)) => dominant_facing(pointer - position),
        _ => dominant_facing(direction),
    }
}

/// Moves `player` along `direction` for `dt` seconds and updates its facing
/// and walk animation. Returns the displacement actually applied.
///
/// `direction` is expected to be normalised or zero. The requested velocity
/// is stored on the player even when collision blocks the move.
pub fn move_player(
    world: &World,
    player: &mut Player,
    direction: Vec2,
    pointer_world: Option<Vec2>,
    policy: FacingPolicy,
    dt: f32,
) -> Vec2 {
    player.velocity = direction * player.speed;
    let mut mover = Mover {
        position: player.position,
        shape: player.footprint(),
        inset: player.bounds_inset,
    };
    let applied = try_move(world, &mut mover, player.velocity * dt);
    player.position = mover.position;

    if let Some(facing) = choose_facing(policy, player.position, direction, pointer_world) {
        player.facing = facing;
    }

    if direction == Vec2::ZERO {
        player.anim_phase = PLAYER_IDLE_FRAME;
    } else {
        player.anim_phase = (player.anim_phase + PLAYER_ANIM_RATE * dt) % WALK_FRAMES;
    }
    applied
}
