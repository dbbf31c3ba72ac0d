//! Monster steering: aggro state machine and force blending.
//!
//! Each tick a monster sums three forces: a wander force converging on a
//! noise-driven target velocity, a constant pull towards the player while
//! pursuing, and a push out of the safe zone inside its repulsion band. The
//! sum is integrated into velocity, the speed is capped, and the resulting
//! displacement goes through the collision resolver.
//!
//! The safe zone always wins. Inside the band the inward radial component
//! of the velocity is removed, and any move that would still bring the
//! monster closer to the safe centre is rejected outright.

use glam::Vec2;
use log::trace;
use serde::Serialize;

use crate::collision::{try_move, Mover};
use crate::config::MonsterConfig;
use crate::entity::{AggroState, Monster, MonsterId, Solid};
use crate::noise::ValueNoise;
use crate::vector_math::{clamp_length, try_direction};
use crate::world::{SafeZone, World};

/// A monster started or stopped pursuing the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggroChange {
    /// Monster whose state changed.
    pub id: MonsterId,
    /// State before the update.
    pub from: AggroState,
    /// State after the update.
    pub to: AggroState,
}

/// Forces acting on a monster during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SteeringForces {
    /// Pull towards the noise-driven wander velocity.
    pub wander: Vec2,
    /// Pull towards the player; zero unless pursuing.
    pub attraction: Vec2,
    /// Push away from the safe centre; zero outside the repulsion band.
    pub repulsion: Vec2,
}

impl SteeringForces {
    /// Sum of all forces.
    #[must_use]
    pub fn total(&self) -> Vec2 {
        self.wander + self.attraction + self.repulsion
    }
}

/// Next aggro state given the distance to the player.
///
/// Pursuit starts below `radius` and ends only beyond
/// `radius × hysteresis`, so a player hovering at the edge does not make
/// the monster flicker between states.
///
/// # Examples
///
/// ```
/// use wildlands::entity::AggroState;
/// use wildlands::steering::next_aggro;
///
/// assert_eq!(next_aggro(AggroState::Idle, 100.0, 256.0, 1.25), AggroState::Pursuing);
/// assert_eq!(next_aggro(AggroState::Pursuing, 300.0, 256.0, 1.25), AggroState::Pursuing);
/// assert_eq!(next_aggro(AggroState::Pursuing, 330.0, 256.0, 1.25), AggroState::Wandering);
/// ```
#[must_use]
pub const fn next_aggro(
    current: AggroState,
    distance: f32,
    radius: f32,
    hysteresis: f32,
) -> AggroState {
    match current {
        AggroState::Pursuing if distance > radius * hysteresis => AggroState::Wandering,
        AggroState::Pursuing => AggroState::Pursuing,
        AggroState::Idle | AggroState::Wandering if distance < radius => AggroState::Pursuing,
        AggroState::Idle | AggroState::Wandering => AggroState::Wandering,
    }
}

/// Target velocity of the wander behaviour at `position`.
///
/// Two noise samples, offset along different axes by the wander phase, map
/// from `[0, 1)` to `[-max_speed, max_speed)` per component.
#[must_use]
pub fn wander_velocity(
    noise: &ValueNoise,
    position: Vec2,
    phase: f32,
    max_speed: f32,
    config: &MonsterConfig,
) -> Vec2 {
    let base = position * config.noise_scale;
    let n1 = noise.sample(base + Vec2::new(phase * config.drift_x, 0.0));
    let n2 = noise.sample(base + Vec2::new(0.0, phase * config.drift_y));
    Vec2::new(n1 - 0.5, n2 - 0.5) * 2.0 * max_speed
}

/// Outward unit vector from the safe centre, `+x` when degenerate.
fn outward(safe_zone: &SafeZone, position: Vec2) -> Vec2 {
    try_direction(safe_zone.center, position).unwrap_or(Vec2::X)
}

/// Forces acting on `monster` this tick. Does not modify the monster.
#[must_use]
pub fn steering_forces(
    monster: &Monster,
    player: Vec2,
    safe_zone: &SafeZone,
    noise: &ValueNoise,
    config: &MonsterConfig,
) -> SteeringForces {
    let desired = wander_velocity(
        noise,
        monster.position,
        monster.wander_phase,
        monster.max_speed,
        config,
    );
    let wander = (desired - monster.velocity) * config.wander_responsiveness;

    let attraction = if monster.aggro == AggroState::Pursuing {
        try_direction(monster.position, player).map_or(Vec2::ZERO, |dir| dir * config.attraction_accel)
    } else {
        Vec2::ZERO
    };

    let repulsion = if safe_zone.repels(monster.position) {
        outward(safe_zone, monster.position) * config.repulsion_accel
    } else {
        Vec2::ZERO
    };

    SteeringForces {
        wander,
        attraction,
        repulsion,
    }
}

/// Advances one monster by `dt` seconds.
///
/// Returns the aggro transition when the monster starts or stops pursuing.
pub fn step_monster(
    monster: &mut Monster,
    player: Vec2,
    world: &World,
    noise: &ValueNoise,
    config: &MonsterConfig,
    dt: f32,
) -> Option<AggroChange> {
    let previous = monster.aggro;
    monster.aggro = next_aggro(
        previous,
        monster.position.distance(player),
        config.aggro_radius,
        config.aggro_hysteresis,
    );
    monster.wander_phase += dt;

    let safe_zone = world.safe_zone();
    let forces = steering_forces(monster, player, safe_zone, noise, config);
    monster.velocity = clamp_length(monster.velocity + forces.total() * dt, monster.max_speed);

    let start = monster.position;
    let in_band = safe_zone.repels(start);
    if in_band {
        let out = outward(safe_zone, start);
        let radial = monster.velocity.dot(out);
        if radial < 0.0 {
            monster.velocity -= out * radial;
        }
    }

    let delta = monster.velocity * dt;
    let target = if config.collide_with_obstacles {
        let mut mover = Mover {
            position: start,
            shape: monster.footprint(),
            inset: config.bounds_inset,
        };
        try_move(world, &mut mover, delta);
        mover.position
    } else {
        world.clamp_with_inset(start + delta, config.bounds_inset)
    };

    if in_band && target.distance(safe_zone.center) < start.distance(safe_zone.center) {
        trace!("{} move towards safe zone rejected", monster.id);
    } else {
        monster.position = target;
    }

    let pursuit_changed = (previous == AggroState::Pursuing) != (monster.aggro == AggroState::Pursuing);
    pursuit_changed.then_some(AggroChange {
        id: monster.id,
        from: previous,
        to: monster.aggro,
    })
}

/// Advances every monster, collecting pursuit transitions.
pub fn step_monsters(
    monsters: &mut [Monster],
    player: Vec2,
    world: &World,
    noise: &ValueNoise,
    config: &MonsterConfig,
    dt: f32,
) -> Vec<AggroChange> {
    monsters
        .iter_mut()
        .filter_map(|monster| step_monster(monster, player, world, noise, config, dt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MonsterId;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> MonsterConfig {
        MonsterConfig::default()
    }

    fn world() -> World {
        World::empty(Vec2::new(4_000.0, 4_000.0), 300.0, 24.0)
    }

    fn monster_at(position: Vec2, config: &MonsterConfig) -> Monster {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        Monster::spawn(MonsterId(1), position, config, &mut rng)
    }

    #[rstest]
    #[case::idle_far(AggroState::Idle, 500.0, AggroState::Wandering)]
    #[case::idle_near(AggroState::Idle, 10.0, AggroState::Pursuing)]
    #[case::wandering_at_edge(AggroState::Wandering, 256.0, AggroState::Wandering)]
    #[case::pursuing_inside_band(AggroState::Pursuing, 319.0, AggroState::Pursuing)]
    #[case::pursuing_escaped(AggroState::Pursuing, 321.0, AggroState::Wandering)]
    fn aggro_transitions(#[case] from: AggroState, #[case] distance: f32, #[case] expected: AggroState) {
        assert_eq!(next_aggro(from, distance, 256.0, 1.25), expected);
    }

    #[rstest]
    fn attraction_has_constant_magnitude(config: MonsterConfig) {
        let world = world();
        let noise = ValueNoise::default();
        for distance in [5.0, 50.0, 200.0] {
            let mut monster = monster_at(Vec2::new(3_000.0, 3_000.0), &config);
            monster.aggro = AggroState::Pursuing;
            let player = monster.position + Vec2::new(distance, 0.0);
            let forces = steering_forces(&monster, player, world.safe_zone(), &noise, &config);
            assert_relative_eq!(forces.attraction.length(), config.attraction_accel, epsilon = 1e-3);
        }
    }

    #[rstest]
    fn attraction_skipped_when_on_player(config: MonsterConfig) {
        let world = world();
        let mut monster = monster_at(Vec2::new(3_000.0, 3_000.0), &config);
        monster.aggro = AggroState::Pursuing;
        let forces = steering_forces(&monster, monster.position, world.safe_zone(), &ValueNoise::default(), &config);
        assert_eq!(forces.attraction, Vec2::ZERO);
    }

    #[rstest]
    fn repulsion_at_centre_pushes_along_x(config: MonsterConfig) {
        let world = world();
        let monster = monster_at(world.safe_zone().center, &config);
        let forces = steering_forces(&monster, Vec2::ZERO, world.safe_zone(), &ValueNoise::default(), &config);
        assert_relative_eq!(forces.repulsion.x, config.repulsion_accel);
        assert_relative_eq!(forces.repulsion.y, 0.0);
    }

    #[rstest]
    fn speed_never_exceeds_cap(config: MonsterConfig) {
        let world = world();
        let noise = ValueNoise::new(7);
        let mut monster = monster_at(Vec2::new(1_000.0, 3_500.0), &config);
        for _ in 0..500 {
            step_monster(&mut monster, Vec2::new(1_050.0, 3_500.0), &world, &noise, &config, 0.033);
            assert!(monster.velocity.length() <= monster.max_speed + 1e-3);
        }
    }

    #[rstest]
    fn pursuit_transitions_are_reported(config: MonsterConfig) {
        let world = world();
        let noise = ValueNoise::default();
        let mut monster = monster_at(Vec2::new(3_000.0, 3_000.0), &config);
        let started = step_monster(&mut monster, Vec2::new(3_010.0, 3_000.0), &world, &noise, &config, 0.01);
        assert_eq!(
            started,
            Some(AggroChange {
                id: MonsterId(1),
                from: AggroState::Idle,
                to: AggroState::Pursuing
            })
        );
        let stopped = step_monster(&mut monster, Vec2::new(100.0, 100.0), &world, &noise, &config, 0.01);
        assert_eq!(stopped.map(|c| c.to), Some(AggroState::Wandering));
    }
}
