//! The per-session simulation context and its fixed-order step.
//!
//! [`SimulationContext`] owns every piece of mutable state for a session:
//! world, player, monsters, vendor, camera, randomness and the noise field.
//! [`SimulationContext::step`] advances it by one tick in a fixed order:
//!
//! 1. dialogue input and timeout,
//! 2. player movement and collision,
//! 3. camera,
//! 4. monster steering,
//! 5. combat,
//! 6. queued purchases.
//!
//! Nothing here depends on a frame scheduler; the same seed and inputs
//! always produce the same state.

use std::collections::VecDeque;

use glam::Vec2;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::camera::Camera;
use crate::combat::{resolve_attack, CombatArena, Kill, Spawner};
use crate::config::SimulationConfig;
use crate::economy::{purchase, ItemKind, Notification};
use crate::entity::{Monster, MonsterId, Player};
use crate::error::ConfigError;
use crate::input::InputIntent;
use crate::movement::move_player;
use crate::noise::ValueNoise;
use crate::render::RenderFrame;
use crate::steering::{step_monsters, AggroChange};
use crate::vendor::{CloseReason, DialogueChange, Vendor};
use crate::world::World;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    /// The vendor dialogue became visible.
    DialogueOpened,
    /// The vendor dialogue was hidden.
    DialogueClosed(CloseReason),
    /// The player walked into the safe zone.
    EnteredSafeZone,
    /// The player walked out of the safe zone.
    LeftSafeZone,
    /// A monster started or stopped pursuing.
    Aggro(AggroChange),
    /// The player swung.
    Swing,
    /// A monster was struck.
    MonsterHit(MonsterId),
    /// A monster died.
    MonsterKilled(Kill),
    /// A purchase attempt was resolved.
    Purchase(Notification),
}

/// What one call to [`SimulationContext::step`] did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepReport {
    /// Tick number after the step.
    pub tick: u64,
    /// Delta time actually simulated, after clamping.
    pub dt: f32,
    /// Events in the order they happened.
    pub events: Vec<SimEvent>,
}

/// Owned copy of the dynamic state, for comparisons and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Tick number.
    pub tick: u64,
    /// Simulated seconds.
    pub elapsed: f64,
    /// The avatar.
    pub player: Player,
    /// Live monsters.
    pub monsters: Vec<Monster>,
    /// The blacksmith.
    pub vendor: Vendor,
    /// Viewport placement.
    pub camera: Camera,
}

/// All state of one play session.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    config: SimulationConfig,
    world: World,
    player: Player,
    monsters: Vec<Monster>,
    vendor: Vendor,
    camera: Camera,
    rng: ChaCha8Rng,
    noise: ValueNoise,
    spawner: Spawner,
    pending_purchases: VecDeque<ItemKind>,
    player_in_safe_zone: bool,
    elapsed: f64,
    tick: u64,
}

impl SimulationContext {
    /// Validates `config`, generates the world from `seed` and populates it.
    ///
    /// Monsters that cannot be placed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildlands::config::SimulationConfig;
    /// use wildlands::input::InputIntent;
    /// use wildlands::simulation::SimulationContext;
    ///
    /// let mut sim = SimulationContext::new(SimulationConfig::default(), 7).unwrap();
    /// let report = sim.step(&InputIntent::default(), 0.016);
    /// assert_eq!(report.tick, 1);
    /// assert_eq!(sim.monsters().len(), 55);
    /// ```
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::generate(&config.world, &mut rng);
        let spawn = world.spawn();
        let player = Player::new(spawn, &config.player);
        let vendor = Vendor::new(spawn + config.vendor.offset, &config.vendor);
        let camera = Camera::follow(spawn, config.timing.viewport, world.size());

        let mut spawner = Spawner::default();
        let mut monsters = Vec::with_capacity(config.monsters.count);
        for _ in 0..config.monsters.count {
            match spawner.spawn(&world, &config.monsters, &mut rng) {
                Ok(monster) => monsters.push(monster),
                Err(err) => warn!("initial monster skipped: {err}"),
            }
        }
        info!(
            "session seeded with {seed}: {} monsters, {} coins",
            monsters.len(),
            player.purse.coins()
        );

        Ok(Self {
            noise: ValueNoise::new(config.monsters.noise_seed),
            player_in_safe_zone: world.is_in_safe_zone(spawn),
            config,
            world,
            player,
            monsters,
            vendor,
            camera,
            rng,
            spawner,
            pending_purchases: VecDeque::new(),
            elapsed: 0.0,
            tick: 0,
        })
    }

    /// Queues a purchase to be resolved at the end of the next step.
    pub fn request_purchase(&mut self, item: ItemKind) {
        debug!("purchase of {item} queued");
        self.pending_purchases.push_back(item);
    }

    /// Updates the viewport size used by the camera from the next step.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport.is_finite() && viewport.cmpgt(Vec2::ZERO).all() {
            self.camera.viewport = viewport;
        }
    }

    /// Clamps a raw frame delta into `[0, max_delta_secs]`.
    ///
    /// Non-finite and negative deltas become zero.
    #[must_use]
    pub const fn clamp_delta(&self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            dt.min(self.config.timing.max_delta_secs)
        } else {
            0.0
        }
    }

    /// Advances the session by one tick.
    pub fn step(&mut self, input: &InputIntent, raw_dt: f32) -> StepReport {
        let dt = self.clamp_delta(raw_dt);
        let mut events = Vec::new();

        // The pointer refers to the frame the player was looking at.
        let pointer_world = input
            .pointer_screen
            .filter(|p| p.is_finite())
            .map(|p| self.camera.screen_to_world(p));

        match self
            .vendor
            .update_dialogue(self.player.position, input.interact, input.dismiss, dt)
        {
            Some(DialogueChange::Opened) => events.push(SimEvent::DialogueOpened),
            Some(DialogueChange::Closed(reason)) => events.push(SimEvent::DialogueClosed(reason)),
            None => {}
        }

        move_player(
            &self.world,
            &mut self.player,
            input.sanitised_direction(),
            pointer_world,
            self.config.player.facing_policy,
            dt,
        );
        let in_safe = self.world.is_in_safe_zone(self.player.position);
        if in_safe != self.player_in_safe_zone {
            self.player_in_safe_zone = in_safe;
            events.push(if in_safe {
                SimEvent::EnteredSafeZone
            } else {
                SimEvent::LeftSafeZone
            });
        }

        self.camera = Camera::follow(self.player.position, self.camera.viewport, self.world.size());

        events.extend(
            step_monsters(
                &mut self.monsters,
                self.player.position,
                &self.world,
                &self.noise,
                &self.config.monsters,
                dt,
            )
            .into_iter()
            .map(SimEvent::Aggro),
        );

        let mut arena = CombatArena {
            world: &self.world,
            monsters: &mut self.monsters,
            spawner: &mut self.spawner,
            rng: &mut self.rng,
        };
        let outcome = resolve_attack(
            &mut self.player,
            input.attack,
            &mut arena,
            &self.config.combat,
            &self.config.monsters,
            dt,
        );
        if outcome.swung {
            events.push(SimEvent::Swing);
        }
        events.extend(outcome.hits.into_iter().map(SimEvent::MonsterHit));
        events.extend(outcome.kills.into_iter().map(SimEvent::MonsterKilled));

        while let Some(item) = self.pending_purchases.pop_front() {
            let result = purchase(
                &mut self.player.purse,
                &self.vendor,
                self.player.position,
                &self.config.economy,
                item,
            );
            if let Err(err) = &result {
                debug!("purchase of {item} rejected: {err}");
            }
            events.push(SimEvent::Purchase(Notification::from_outcome(&result)));
        }

        self.elapsed += f64::from(dt);
        self.tick += 1;
        StepReport {
            tick: self.tick,
            dt,
            events,
        }
    }

    /// Borrowed view for the renderer.
    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::new(
            &self.world,
            &self.camera,
            &self.player,
            &self.monsters,
            &self.vendor,
        )
    }

    /// Owned copy of the dynamic state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            elapsed: self.elapsed,
            player: self.player.clone(),
            monsters: self.monsters.clone(),
            vendor: self.vendor.clone(),
            camera: self.camera,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Static world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The avatar.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the avatar, for hosts that teleport or reset it.
    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Live monsters.
    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Mutable access to the live monsters, for scripted encounters.
    pub const fn monsters_mut(&mut self) -> &mut Vec<Monster> {
        &mut self.monsters
    }

    /// The blacksmith.
    #[must_use]
    pub const fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    /// Current viewport placement.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether the player stands inside the safe zone.
    #[must_use]
    pub const fn player_in_safe_zone(&self) -> bool {
        self.player_in_safe_zone
    }

    /// Purchases waiting for the next step.
    #[must_use]
    pub fn pending_purchases(&self) -> usize {
        self.pending_purchases.len()
    }

    /// Number of completed steps.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since the session started.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
