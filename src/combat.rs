//! Melee combat, kill rewards and monster respawning.
//!
//! A swing hits every live monster within reach at once. Killed monsters
//! are removed, pay out a random reward and are immediately replaced by a
//! fresh monster outside the safe zone, so the population stays constant
//! unless a replacement cannot be placed.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::config::{CombatConfig, MonsterConfig};
use crate::economy::Equipment;
use crate::entity::{Damageable, Monster, MonsterId, Player};
use crate::error::PlacementExhausted;
use crate::geometry::BoundingShape;
use crate::world::World;

/// Hands out monster identifiers and places new monsters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Spawner {
    next_id: u64,
}

impl Spawner {
    /// A spawner whose first identifier is `first_id`.
    #[must_use]
    pub const fn starting_at(first_id: u64) -> Self {
        Self { next_id: first_id }
    }

    /// Identifier the next spawn will receive.
    #[must_use]
    pub const fn peek_id(&self) -> MonsterId {
        MonsterId(self.next_id)
    }

    /// Spawns a monster at a random open point farther than the safe radius
    /// plus the configured clearance from the safe centre.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementExhausted`] when no point is found within
    /// `config.spawn_attempts` tries. No identifier is consumed then.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        world: &World,
        config: &MonsterConfig,
        rng: &mut R,
    ) -> Result<Monster, PlacementExhausted> {
        let min_distance = world.safe_zone().radius + config.spawn_clearance;
        let position = world.random_open_point(
            rng,
            min_distance,
            BoundingShape::Circle {
                radius: config.radius,
            },
            config.bounds_inset,
            config.spawn_attempts,
        )?;
        let id = MonsterId(self.next_id);
        self.next_id += 1;
        Ok(Monster::spawn(id, position, config, rng))
    }
}

/// A monster killed by a swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kill {
    /// The monster that died.
    pub id: MonsterId,
    /// Where it died.
    pub position: Vec2,
    /// Coins credited to the player.
    pub reward: u32,
    /// Replacement monster, absent when placement was exhausted.
    pub replacement: Option<MonsterId>,
}

/// Result of one tick of combat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttackOutcome {
    /// Whether a swing started this tick.
    pub swung: bool,
    /// Monsters damaged, in population order.
    pub hits: Vec<MonsterId>,
    /// Monsters killed, in population order.
    pub kills: Vec<Kill>,
}

/// Current melee reach of the player.
#[must_use]
pub fn reach(player: &Player, config: &CombatConfig) -> f32 {
    if player.purse.owns(Equipment::Weapon) {
        config.weapon_reach
    } else {
        config.base_reach
    }
}

/// Counts down the attack cooldown and the swing visual.
pub const fn tick_timers(player: &mut Player, dt: f32) {
    player.attack_cooldown = (player.attack_cooldown - dt).max(0.0);
    player.swing_timer = (player.swing_timer - dt).max(0.0);
}

/// Draws a kill reward from `[reward_min, reward_max)`.
pub fn roll_reward<R: Rng + ?Sized>(config: &CombatConfig, rng: &mut R) -> u32 {
    if config.reward_max > config.reward_min {
        rng.gen_range(config.reward_min..config.reward_max)
    } else {
        config.reward_min
    }
}

/// Mutable state a combat tick works on.
pub struct CombatArena<'a, R: Rng + ?Sized> {
    /// Static world, used to place replacements.
    pub world: &'a World,
    /// Live monster population.
    pub monsters: &'a mut Vec<Monster>,
    /// Identifier source for replacements.
    pub spawner: &'a mut Spawner,
    /// Session randomness.
    pub rng: &'a mut R,
}

/// Runs one tick of combat for `player`.
///
/// Timers tick down first. When `attack` is requested and the cooldown has
/// elapsed, a swing starts and every live monster strictly within reach
/// loses one hit point. Kills are credited and replaced before returning.
pub fn resolve_attack<R: Rng + ?Sized>(
    player: &mut Player,
    attack: bool,
    arena: &mut CombatArena<'_, R>,
    combat: &CombatConfig,
    monsters: &MonsterConfig,
    dt: f32,
) -> AttackOutcome {
    tick_timers(player, dt);
    let mut outcome = AttackOutcome::default();
    if !attack || player.attack_cooldown > 0.0 {
        return outcome;
    }
    outcome.swung = true;
    player.attack_cooldown = combat.attack_cooldown;
    player.swing_timer = combat.swing_visual;

    let reach = reach(player, combat);
    let mut dead = Vec::new();
    for monster in arena.monsters.iter_mut() {
        if !monster.is_alive() || monster.position.distance(player.position) >= reach {
            continue;
        }
        outcome.hits.push(monster.id);
        if monster.apply_damage(1) {
            dead.push((monster.id, monster.position));
        }
    }
    if outcome.hits.is_empty() {
        return outcome;
    }
    debug!("swing hit {} monsters", outcome.hits.len());

    arena.monsters.retain(|monster| monster.is_alive());
    for (id, position) in dead {
        let reward = roll_reward(combat, arena.rng);
        player.purse.credit(reward);
        let replacement = match arena.spawner.spawn(arena.world, monsters, arena.rng) {
            Ok(monster) => {
                let new_id = monster.id;
                arena.monsters.push(monster);
                Some(new_id)
            }
            Err(err) => {
                warn!("could not respawn after {id}: {err}");
                None
            }
        };
        info!("{id} killed for {reward} coins");
        outcome.kills.push(Kill {
            id,
            position,
            reward,
            replacement,
        });
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, SimulationConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn setup() -> (World, Player, Vec<Monster>, ChaCha8Rng) {
        let world = World::empty(Vec2::new(2_000.0, 2_000.0), 200.0, 24.0);
        let player = Player::new(Vec2::new(1_600.0, 1_600.0), &PlayerConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = MonsterConfig::default();
        let monsters = vec![
            Monster::spawn(MonsterId(0), Vec2::new(1_620.0, 1_600.0), &config, &mut rng),
            Monster::spawn(MonsterId(1), Vec2::new(1_600.0, 1_630.0), &config, &mut rng),
            Monster::spawn(MonsterId(2), Vec2::new(1_700.0, 1_600.0), &config, &mut rng),
        ];
        (world, player, monsters, rng)
    }

    #[rstest]
    #[case::bare_hands(false, vec![MonsterId(0)])]
    #[case::with_weapon(true, vec![MonsterId(0), MonsterId(1)])]
    fn swing_hits_everything_in_reach(#[case] weapon: bool, #[case] expected: Vec<MonsterId>) {
        let (world, mut player, mut monsters, mut rng) = setup();
        if weapon {
            player.purse.grant(Equipment::Weapon);
        }
        let mut spawner = Spawner::starting_at(3);
        let config = SimulationConfig::default();
        let mut arena = CombatArena {
            world: &world,
            monsters: &mut monsters,
            spawner: &mut spawner,
            rng: &mut rng,
        };
        let outcome = resolve_attack(&mut player, true, &mut arena, &config.combat, &config.monsters, 0.016);
        assert!(outcome.swung);
        assert_eq!(outcome.hits, expected);
        assert!(outcome.kills.is_empty());
    }

    #[test]
    fn cooldown_blocks_repeat_swings() {
        let (world, mut player, mut monsters, mut rng) = setup();
        let mut spawner = Spawner::starting_at(3);
        let config = SimulationConfig::default();
        let mut arena = CombatArena {
            world: &world,
            monsters: &mut monsters,
            spawner: &mut spawner,
            rng: &mut rng,
        };
        let first = resolve_attack(&mut player, true, &mut arena, &config.combat, &config.monsters, 0.016);
        let second = resolve_attack(&mut player, true, &mut arena, &config.combat, &config.monsters, 0.016);
        assert!(first.swung);
        assert!(!second.swung);
        assert!(player.is_swinging());
        for _ in 0..12 {
            resolve_attack(&mut player, false, &mut arena, &config.combat, &config.monsters, 0.016);
        }
        assert!(!player.is_swinging());
        let third = resolve_attack(&mut player, true, &mut arena, &config.combat, &config.monsters, 0.016);
        assert!(third.swung);
    }

    #[test]
    fn rewards_stay_in_range() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1_000 {
            let reward = roll_reward(&config, &mut rng);
            assert!((config.reward_min..config.reward_max).contains(&reward));
        }
    }

    #[test]
    fn kill_without_room_to_respawn_still_pays_out() {
        let world = World::empty(Vec2::new(100.0, 100.0), 45.0, 0.0);
        let config = SimulationConfig {
            monsters: MonsterConfig {
                hp: 1,
                spawn_attempts: 10,
                ..MonsterConfig::default()
            },
            ..SimulationConfig::default()
        };
        let mut player = Player::new(Vec2::new(50.0, 50.0), &config.player);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut monsters = vec![Monster::spawn(
            MonsterId(0),
            Vec2::new(60.0, 50.0),
            &config.monsters,
            &mut rng,
        )];
        let mut spawner = Spawner::starting_at(1);
        let mut arena = CombatArena {
            world: &world,
            monsters: &mut monsters,
            spawner: &mut spawner,
            rng: &mut rng,
        };

        let outcome = resolve_attack(&mut player, true, &mut arena, &config.combat, &config.monsters, 0.016);

        let [kill] = outcome.kills.as_slice() else {
            panic!("expected exactly one kill, got {:?}", outcome.kills);
        };
        assert_eq!(kill.id, MonsterId(0));
        assert_eq!(kill.replacement, None);
        assert_eq!(player.purse.coins(), config.player.starting_coins + kill.reward);
        assert!(monsters.is_empty(), "the population shrinks when no spot is free");
        assert_eq!(spawner.peek_id(), MonsterId(1));
    }

    #[test]
    fn exhausted_spawner_keeps_identifier() {
        let world = World::empty(Vec2::new(100.0, 100.0), 45.0, 0.0);
        let config = MonsterConfig {
            spawn_attempts: 10,
            ..MonsterConfig::default()
        };
        let mut spawner = Spawner::starting_at(7);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(spawner.spawn(&world, &config, &mut rng).is_err());
        assert_eq!(spawner.peek_id(), MonsterId(7));
    }
}
