//! Game constants used as defaults across systems.
//!
//! Values here seed [`crate::config::SimulationConfig`]; a configuration file
//! may override any of them at start-up.

/// Edge length of one map tile in world units.
pub const TILE: f32 = 32.0;
/// World width in tiles.
pub const WORLD_TILES_WIDE: f32 = 220.0;
/// World height in tiles.
pub const WORLD_TILES_HIGH: f32 = 180.0;
/// Safe-zone radius in tiles.
pub const SAFE_ZONE_RADIUS_TILES: f32 = 18.0;
/// Band beyond the safe-zone edge in which monsters are still repelled.
pub const SAFE_ZONE_MARGIN: f32 = 24.0;

/// Player walking speed in world units per second.
pub const PLAYER_SPEED: f32 = 240.0;
/// Player collision box width.
pub const PLAYER_WIDTH: f32 = 20.0;
/// Player collision box height.
pub const PLAYER_HEIGHT: f32 = 26.0;
/// Coins the player starts with.
pub const PLAYER_STARTING_COINS: u32 = 60;
/// Distance kept between the player and the world edge.
pub const PLAYER_BOUNDS_INSET: f32 = 8.0;
/// Walk-cycle frames advanced per second of movement.
pub const PLAYER_ANIM_RATE: f32 = 9.0;
/// Sprite frame shown while standing still.
pub const PLAYER_IDLE_FRAME: f32 = 1.0;

/// Size of the monster population.
pub const MONSTER_COUNT: usize = 55;
/// Monster collision radius.
pub const MONSTER_RADIUS: f32 = 15.0;
/// Hit points of a freshly spawned monster.
pub const MONSTER_HP: u32 = 3;
/// Lower bound of a monster's rolled top speed.
pub const MONSTER_MIN_SPEED: f32 = 70.0;
/// Upper bound of a monster's rolled top speed.
pub const MONSTER_MAX_SPEED: f32 = 100.0;
/// Distance kept between a monster and the world edge.
pub const MONSTER_BOUNDS_INSET: f32 = 10.0;
/// Candidate points tried per monster spawn.
pub const MONSTER_SPAWN_ATTEMPTS: u32 = 200;
/// Extra clearance past the safe-zone edge required for spawn points.
pub const MONSTER_SPAWN_CLEARANCE_TILES: f32 = 2.0;
/// Distance in tiles at which a monster starts pursuing.
pub const AGGRO_RADIUS_TILES: f32 = 8.0;
/// Pursuit ends once the player is this many aggro radii away.
pub const AGGRO_HYSTERESIS: f32 = 1.25;
/// Spatial frequency of the wander noise field.
pub const NOISE_SCALE: f32 = 0.005;
/// Horizontal drift of the wander field per second.
pub const WANDER_DRIFT_X: f32 = 0.8;
/// Vertical drift of the wander field per second.
pub const WANDER_DRIFT_Y: f32 = 0.9;
/// Rate (per second) at which velocity converges on the wander target.
pub const WANDER_RESPONSIVENESS: f32 = 6.0;
/// Acceleration towards a pursued player.
pub const ATTRACTION_ACCEL: f32 = 240.0;
/// Acceleration pushing monsters out of the safe zone.
pub const SAFE_ZONE_REPULSION_ACCEL: f32 = 2400.0;
/// Seed of the wander noise field when none is given.
pub const DEFAULT_NOISE_SEED: u32 = 4242;

/// Seconds between two swings.
pub const ATTACK_COOLDOWN_SECS: f32 = 0.18;
/// Seconds a swing stays visible.
pub const SWING_VISUAL_SECS: f32 = 0.14;
/// Melee reach without a weapon.
pub const BASE_REACH: f32 = 24.0;
/// Melee reach with a weapon.
pub const WEAPON_REACH: f32 = 36.0;
/// Smallest kill reward.
pub const KILL_REWARD_MIN: u32 = 10;
/// Exclusive upper bound of the kill reward.
pub const KILL_REWARD_MAX: u32 = 20;

/// Price of the sword.
pub const SWORD_PRICE: u32 = 50;
/// Price of the armor.
pub const ARMOR_PRICE: u32 = 80;

/// Blacksmith collision radius.
pub const VENDOR_RADIUS: f32 = 22.0;
/// Distance in tiles from which the blacksmith can be addressed.
pub const VENDOR_INTERACTION_TILES: f32 = 2.0;
/// Seconds the dialogue stays open once the player walks away.
pub const DIALOGUE_LINGER_SECS: f32 = 3.0;

/// Trees scattered by world generation.
pub const TREE_COUNT: usize = 240;
/// Tree trunk radius.
pub const TREE_RADIUS: f32 = 24.0;
/// Rocks scattered by world generation.
pub const ROCK_COUNT: usize = 60;
/// Rock radius.
pub const ROCK_RADIUS: f32 = 14.0;
/// Width of each village house.
pub const HOUSE_WIDTH: f32 = 224.0;
/// Height of each village house.
pub const HOUSE_HEIGHT: f32 = 200.0;
/// Candidate points tried per scenery item.
pub const PLACEMENT_ATTEMPTS: u32 = 16;
/// Fraction of the safe-zone radius kept clear of random scenery.
pub const SCENERY_EXCLUSION_FRACTION: f32 = 0.8;
/// Width of the cosmetic paths in tiles.
pub const PATH_WIDTH_TILES: f32 = 1.5;

/// Upper bound for a single simulation step, preventing tunnelling on hitches.
pub const MAX_DELTA_SECS: f32 = 0.033;
/// Largest step clamp a configuration may ask for.
pub const MAX_DELTA_CEILING_SECS: f32 = 0.25;
/// Camera viewport width before the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
/// Camera viewport height before the host reports one.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
