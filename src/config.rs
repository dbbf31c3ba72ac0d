//! Runtime configuration for a simulation session.
//!
//! Every field defaults to the matching value in [`crate::constants`]. A JSON
//! file may override any subset of fields; missing sections and fields keep
//! their defaults.
//!
//! ```
//! use wildlands::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{ "combat": { "reward_min": 5 } }"#).unwrap();
//! assert_eq!(config.combat.reward_min, 5);
//! assert_eq!(config.combat.reward_max, 20);
//! ```

use std::fs;
use std::path::Path;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::economy::PriceList;
use crate::error::ConfigError;
use crate::movement::FacingPolicy;
use crate::{
    AGGRO_HYSTERESIS, AGGRO_RADIUS_TILES, ATTACK_COOLDOWN_SECS, ATTRACTION_ACCEL, BASE_REACH,
    DEFAULT_NOISE_SEED, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DIALOGUE_LINGER_SECS,
    KILL_REWARD_MAX, KILL_REWARD_MIN, MAX_DELTA_CEILING_SECS, MAX_DELTA_SECS, MONSTER_BOUNDS_INSET,
    MONSTER_COUNT, MONSTER_HP, MONSTER_MAX_SPEED, MONSTER_MIN_SPEED, MONSTER_RADIUS,
    MONSTER_SPAWN_ATTEMPTS, MONSTER_SPAWN_CLEARANCE_TILES, NOISE_SCALE, PATH_WIDTH_TILES,
    PLACEMENT_ATTEMPTS, PLAYER_BOUNDS_INSET, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_STARTING_COINS,
    PLAYER_WIDTH, ROCK_COUNT, ROCK_RADIUS, SAFE_ZONE_MARGIN, SAFE_ZONE_RADIUS_TILES,
    SAFE_ZONE_REPULSION_ACCEL, SCENERY_EXCLUSION_FRACTION, SWING_VISUAL_SECS, TILE, TREE_COUNT,
    TREE_RADIUS, VENDOR_INTERACTION_TILES, VENDOR_RADIUS, WANDER_DRIFT_X, WANDER_DRIFT_Y,
    WANDER_RESPONSIVENESS, WEAPON_REACH, WORLD_TILES_HIGH, WORLD_TILES_WIDE,
};

/// World dimensions and scenery generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in world units.
    pub width: f32,
    /// World height in world units.
    pub height: f32,
    /// Safe-zone radius around the spawn point.
    pub safe_zone_radius: f32,
    /// Repulsion band beyond the safe-zone edge.
    pub safe_zone_margin: f32,
    /// Number of trees to scatter.
    pub tree_count: usize,
    /// Tree collision radius.
    pub tree_radius: f32,
    /// Number of rocks to scatter.
    pub rock_count: usize,
    /// Rock collision radius.
    pub rock_radius: f32,
    /// Retries for each random scenery placement.
    pub placement_attempts: u32,
    /// Fraction of the safe radius kept free of random scenery.
    pub scenery_exclusion_fraction: f32,
    /// Whether the four village houses are placed around the spawn.
    pub place_houses: bool,
    /// Whether the cosmetic dirt and stone paths are generated.
    pub generate_paths: bool,
    /// Stroke width of cosmetic paths.
    pub path_width: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_TILES_WIDE * TILE,
            height: WORLD_TILES_HIGH * TILE,
            safe_zone_radius: SAFE_ZONE_RADIUS_TILES * TILE,
            safe_zone_margin: SAFE_ZONE_MARGIN,
            tree_count: TREE_COUNT,
            tree_radius: TREE_RADIUS,
            rock_count: ROCK_COUNT,
            rock_radius: ROCK_RADIUS,
            placement_attempts: PLACEMENT_ATTEMPTS,
            scenery_exclusion_fraction: SCENERY_EXCLUSION_FRACTION,
            place_houses: true,
            generate_paths: true,
            path_width: PATH_WIDTH_TILES * TILE,
        }
    }
}

impl WorldConfig {
    /// World dimensions as a vector.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Player avatar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Footprint width.
    pub width: f32,
    /// Footprint height.
    pub height: f32,
    /// Coins held at spawn.
    pub starting_coins: u32,
    /// Distance kept from the world edge.
    pub bounds_inset: f32,
    /// How the avatar's facing is chosen.
    pub facing_policy: FacingPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            starting_coins: PLAYER_STARTING_COINS,
            bounds_inset: PLAYER_BOUNDS_INSET,
            facing_policy: FacingPolicy::Pointer,
        }
    }
}

/// Monster population and steering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    /// Live population size.
    pub count: usize,
    /// Collision radius.
    pub radius: f32,
    /// Hit points at spawn.
    pub hp: u32,
    /// Lower bound of the per-monster speed cap.
    pub min_speed: f32,
    /// Upper bound (exclusive) of the per-monster speed cap.
    pub max_speed: f32,
    /// Distance kept from the world edge.
    pub bounds_inset: f32,
    /// Retries when choosing a spawn point.
    pub spawn_attempts: u32,
    /// Extra clearance past the safe-zone edge for spawn points.
    pub spawn_clearance: f32,
    /// Distance at which a monster starts pursuing the player.
    pub aggro_radius: f32,
    /// Multiple of `aggro_radius` at which pursuit ends.
    pub aggro_hysteresis: f32,
    /// Scale from world units to noise-field units.
    pub noise_scale: f32,
    /// Noise drift per second of wander phase along x.
    pub drift_x: f32,
    /// Noise drift per second of wander phase along y.
    pub drift_y: f32,
    /// Rate at which velocity converges on the wander target.
    pub wander_responsiveness: f32,
    /// Constant pull towards a pursued player.
    pub attraction_accel: f32,
    /// Push away from the safe-zone centre inside the repulsion band.
    pub repulsion_accel: f32,
    /// Whether monsters slide around obstacles instead of passing through.
    pub collide_with_obstacles: bool,
    /// Seed of the wander noise field.
    pub noise_seed: u32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            count: MONSTER_COUNT,
            radius: MONSTER_RADIUS,
            hp: MONSTER_HP,
            min_speed: MONSTER_MIN_SPEED,
            max_speed: MONSTER_MAX_SPEED,
            bounds_inset: MONSTER_BOUNDS_INSET,
            spawn_attempts: MONSTER_SPAWN_ATTEMPTS,
            spawn_clearance: MONSTER_SPAWN_CLEARANCE_TILES * TILE,
            aggro_radius: AGGRO_RADIUS_TILES * TILE,
            aggro_hysteresis: AGGRO_HYSTERESIS,
            noise_scale: NOISE_SCALE,
            drift_x: WANDER_DRIFT_X,
            drift_y: WANDER_DRIFT_Y,
            wander_responsiveness: WANDER_RESPONSIVENESS,
            attraction_accel: ATTRACTION_ACCEL,
            repulsion_accel: SAFE_ZONE_REPULSION_ACCEL,
            collide_with_obstacles: true,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

/// Melee combat settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Seconds between swings.
    pub attack_cooldown: f32,
    /// Seconds a swing stays visible.
    pub swing_visual: f32,
    /// Reach without the weapon upgrade.
    pub base_reach: f32,
    /// Reach with the weapon upgrade.
    pub weapon_reach: f32,
    /// Smallest kill reward.
    pub reward_min: u32,
    /// Exclusive upper bound of the kill reward.
    pub reward_max: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_cooldown: ATTACK_COOLDOWN_SECS,
            swing_visual: SWING_VISUAL_SECS,
            base_reach: BASE_REACH,
            weapon_reach: WEAPON_REACH,
            reward_min: KILL_REWARD_MIN,
            reward_max: KILL_REWARD_MAX,
        }
    }
}

/// Blacksmith placement and dialogue settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Offset from the spawn point in world units.
    pub offset: Vec2,
    /// Body radius.
    pub radius: f32,
    /// Distance within which the player can talk and trade.
    pub interaction_radius: f32,
    /// Seconds an open dialogue survives with the player out of range.
    pub dialogue_linger: f32,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(4.0 * TILE, TILE),
            radius: VENDOR_RADIUS,
            interaction_radius: VENDOR_INTERACTION_TILES * TILE,
            dialogue_linger: DIALOGUE_LINGER_SECS,
        }
    }
}

/// Frame timing and viewport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Upper bound for a single step's delta time.
    pub max_delta_secs: f32,
    /// Initial viewport size; the host may resize it later.
    pub viewport: Vec2,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_delta_secs: MAX_DELTA_SECS,
            viewport: Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        }
    }
}

/// Complete configuration of a simulation session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World and scenery.
    pub world: WorldConfig,
    /// Player avatar.
    pub player: PlayerConfig,
    /// Monster population and steering.
    pub monsters: MonsterConfig,
    /// Melee combat.
    pub combat: CombatConfig,
    /// Shop prices.
    pub economy: PriceList,
    /// Blacksmith.
    pub vendor: VendorConfig,
    /// Frame timing.
    pub timing: TimingConfig,
}

impl SimulationConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Checks that every value is within its permitted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((field, _)) = self.float_fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::invalid(field, "value must be finite"));
        }
        if let Some((field, _)) = self.non_negative_fields().into_iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::invalid(field, "value cannot be negative"));
        }

        let world = &self.world;
        if world.width <= 0.0 || world.height <= 0.0 {
            return Err(ConfigError::invalid("world.width", "world dimensions must be positive"));
        }
        if world.safe_zone_radius <= 0.0 {
            return Err(ConfigError::invalid(
                "world.safe_zone_radius",
                "safe zone radius must be positive",
            ));
        }
        if world.safe_zone_radius * 2.0 > world.width.min(world.height) {
            return Err(ConfigError::invalid(
                "world.safe_zone_radius",
                "safe zone must fit inside the world",
            ));
        }
        if world.tree_radius <= 0.0 || world.rock_radius <= 0.0 {
            return Err(ConfigError::invalid(
                "world.tree_radius",
                "scenery radii must be positive",
            ));
        }

        let player = &self.player;
        if player.width <= 0.0 || player.height <= 0.0 {
            return Err(ConfigError::invalid(
                "player.width",
                "the player footprint must be positive",
            ));
        }

        let monsters = &self.monsters;
        if monsters.hp == 0 {
            return Err(ConfigError::invalid("monsters.hp", "monsters need at least 1 hp"));
        }
        if monsters.radius <= 0.0 {
            return Err(ConfigError::invalid("monsters.radius", "radius must be positive"));
        }
        if monsters.min_speed <= 0.0 || monsters.min_speed > monsters.max_speed {
            return Err(ConfigError::invalid(
                "monsters.min_speed",
                "speed range must be positive and ordered",
            ));
        }
        if monsters.aggro_hysteresis < 1.0 {
            return Err(ConfigError::invalid(
                "monsters.aggro_hysteresis",
                "hysteresis must be at least 1.0",
            ));
        }
        if monsters.repulsion_accel <= 0.0 {
            return Err(ConfigError::invalid(
                "monsters.repulsion_accel",
                "the safe zone must push monsters out",
            ));
        }

        let combat = &self.combat;
        if combat.reward_min >= combat.reward_max {
            return Err(ConfigError::invalid(
                "combat.reward_min",
                format!(
                    "reward range [{}, {}) is empty",
                    combat.reward_min, combat.reward_max
                ),
            ));
        }

        let timing = &self.timing;
        if timing.max_delta_secs <= 0.0 || timing.max_delta_secs > MAX_DELTA_CEILING_SECS {
            return Err(ConfigError::invalid(
                "timing.max_delta_secs",
                format!("delta clamp must lie in (0, {MAX_DELTA_CEILING_SECS}]"),
            ));
        }
        if !timing.viewport.cmpgt(Vec2::ZERO).all() {
            return Err(ConfigError::invalid("timing.viewport", "viewport must be positive"));
        }
        Ok(())
    }

    fn float_fields(&self) -> Vec<(&'static str, f32)> {
        let (world, player, monsters) = (&self.world, &self.player, &self.monsters);
        let (combat, vendor, timing) = (&self.combat, &self.vendor, &self.timing);
        let mut fields = self.non_negative_fields();
        fields.extend([
            ("world.width", world.width),
            ("world.height", world.height),
            ("world.safe_zone_radius", world.safe_zone_radius),
            ("world.tree_radius", world.tree_radius),
            ("world.rock_radius", world.rock_radius),
            ("player.width", player.width),
            ("player.height", player.height),
            ("monsters.radius", monsters.radius),
            ("monsters.min_speed", monsters.min_speed),
            ("monsters.max_speed", monsters.max_speed),
            ("monsters.aggro_hysteresis", monsters.aggro_hysteresis),
            ("monsters.noise_scale", monsters.noise_scale),
            ("monsters.drift_x", monsters.drift_x),
            ("monsters.drift_y", monsters.drift_y),
            ("monsters.repulsion_accel", monsters.repulsion_accel),
            ("vendor.offset", vendor.offset.x),
            ("vendor.offset", vendor.offset.y),
            ("vendor.radius", vendor.radius),
            ("timing.max_delta_secs", timing.max_delta_secs),
            ("timing.viewport", timing.viewport.x),
            ("timing.viewport", timing.viewport.y),
        ]);
        fields
    }

    fn non_negative_fields(&self) -> Vec<(&'static str, f32)> {
        let (world, player, monsters) = (&self.world, &self.player, &self.monsters);
        let (combat, vendor) = (&self.combat, &self.vendor);
        vec![
            ("world.safe_zone_margin", world.safe_zone_margin),
            ("world.scenery_exclusion_fraction", world.scenery_exclusion_fraction),
            ("world.path_width", world.path_width),
            ("player.speed", player.speed),
            ("player.bounds_inset", player.bounds_inset),
            ("monsters.bounds_inset", monsters.bounds_inset),
            ("monsters.spawn_clearance", monsters.spawn_clearance),
            ("monsters.aggro_radius", monsters.aggro_radius),
            ("monsters.wander_responsiveness", monsters.wander_responsiveness),
            ("monsters.attraction_accel", monsters.attraction_accel),
            ("combat.attack_cooldown", combat.attack_cooldown),
            ("combat.swing_visual", combat.swing_visual),
            ("combat.base_reach", combat.base_reach),
            ("combat.weapon_reach", combat.weapon_reach),
            ("vendor.interaction_radius", vendor.interaction_radius),
            ("vendor.dialogue_linger", vendor.dialogue_linger),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        SimulationConfig::default()
            .validate()
            .expect("default configuration must validate");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{ "world": { "tree_count": 3 }, "economy": { "sword": 5 } }"#,
        )
        .expect("valid partial config");
        assert_eq!(config.world.tree_count, 3);
        assert_eq!(config.economy.sword, 5);
        assert_eq!(config.economy.armor, crate::ARMOR_PRICE);
        assert_eq!(config.monsters, MonsterConfig::default());
    }

    #[rstest]
    #[case::empty_reward(r#"{ "combat": { "reward_min": 20, "reward_max": 20 } }"#, "combat.reward_min")]
    #[case::zero_hp(r#"{ "monsters": { "hp": 0 } }"#, "monsters.hp")]
    #[case::oversized_safe_zone(r#"{ "world": { "safe_zone_radius": 1e9 } }"#, "world.safe_zone_radius")]
    #[case::bad_hysteresis(r#"{ "monsters": { "aggro_hysteresis": 0.5 } }"#, "monsters.aggro_hysteresis")]
    #[case::zero_delta(r#"{ "timing": { "max_delta_secs": 0.0 } }"#, "timing.max_delta_secs")]
    #[case::huge_delta(r#"{ "timing": { "max_delta_secs": 5.0 } }"#, "timing.max_delta_secs")]
    #[case::overflowing_delta(r#"{ "timing": { "max_delta_secs": 1e39 } }"#, "timing.max_delta_secs")]
    #[case::overflowing_speed(r#"{ "monsters": { "max_speed": 1e39 } }"#, "monsters.max_speed")]
    #[case::overflowing_offset(r#"{ "vendor": { "offset": [1e39, 0.0] } }"#, "vendor.offset")]
    #[case::negative_repulsion(r#"{ "monsters": { "repulsion_accel": -10.0 } }"#, "monsters.repulsion_accel")]
    #[case::zero_repulsion(r#"{ "monsters": { "repulsion_accel": 0.0 } }"#, "monsters.repulsion_accel")]
    #[case::negative_attraction(r#"{ "monsters": { "attraction_accel": -1.0 } }"#, "monsters.attraction_accel")]
    #[case::negative_aggro(r#"{ "monsters": { "aggro_radius": -5.0 } }"#, "monsters.aggro_radius")]
    #[case::negative_clearance(r#"{ "monsters": { "spawn_clearance": -1.0 } }"#, "monsters.spawn_clearance")]
    #[case::negative_inset(r#"{ "monsters": { "bounds_inset": -1.0 } }"#, "monsters.bounds_inset")]
    #[case::zero_viewport(r#"{ "timing": { "viewport": [0.0, 720.0] } }"#, "timing.viewport")]
    fn invalid_values_are_rejected(#[case] json: &str, #[case] expected_field: &str) {
        match SimulationConfig::from_json_str(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationConfig::from_path(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
