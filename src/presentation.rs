//! Presentation layer plugin: camera, device input and gizmo drawing.
//!
//! `PresentationPlugin` spawns the 2D camera, translates keyboard, mouse and
//! window state into the driver's [`InputState`] and [`PurchaseInbox`],
//! keeps the camera over the simulation viewport and draws each
//! [`RenderFrame`] with gizmos. It never mutates simulation state directly.
//!
//! Gizmos are drawn in world units with the y axis flipped, since the
//! simulation's y grows downward and bevy's grows upward.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::combat::reach;
use crate::driver::{InputState, PurchaseInbox, SimulationSet, SimulationState};
use crate::economy::{Equipment, ItemKind};
use crate::geometry::SolidBody;
use crate::input::{compute_move_direction, DirectionalKeys, InputIntent};
use crate::render::{DrawItem, RenderFrame, Renderer};
use crate::world::{ObstacleKind, PathSurface};

/// Marker component for the camera that follows the simulation viewport.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct CameraController;

/// Plugin owning camera setup, input capture and drawing.
///
/// Requires [`crate::driver::SimulationPlugin`] to be added first.
///
/// # Examples
///
/// ```ignore
/// use bevy::prelude::*;
/// use wildlands::driver::SimulationPlugin;
/// use wildlands::presentation::PresentationPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins((SimulationPlugin::default(), PresentationPlugin))
///     .run();
/// ```
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraController>();
        app.add_systems(Startup, camera_setup);
        app.add_systems(Update, capture_input_system.in_set(SimulationSet::Input));
        app.add_systems(
            Update,
            (sync_camera_system, draw_frame_system)
                .chain()
                .in_set(SimulationSet::Present),
        );
    }
}

/// Spawns the presentation camera at startup if no camera exists.
fn camera_setup(mut commands: Commands, cameras: Query<&Camera2d>) {
    if cameras.is_empty() {
        commands.spawn((Camera2d, CameraController, Name::new("PresentationCamera")));
    }
}

/// Reads WASD/arrow keys, the mouse and the primary window into the
/// simulation's input resources.
///
/// Movement and attack are level signals; `E`, `Escape` and the shop keys
/// `1`/`2` are edge signals. The window size becomes the simulation
/// viewport.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn capture_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<SimulationState>,
    mut input: ResMut<InputState>,
    mut inbox: ResMut<PurchaseInbox>,
) {
    let keys = DirectionalKeys {
        up: keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp),
        down: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
        left: keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight),
    };
    let primary = windows.single().ok();
    if let Some(window) = primary {
        state.0.set_viewport(Vec2::new(window.width(), window.height()));
    }

    let previous = input.0;
    input.0 = InputIntent {
        direction: compute_move_direction(keys),
        attack: mouse.pressed(MouseButton::Left),
        interact: previous.interact || keyboard.just_pressed(KeyCode::KeyE),
        dismiss: previous.dismiss || keyboard.just_pressed(KeyCode::Escape),
        pointer_screen: primary.and_then(Window::cursor_position),
    };

    if state.0.vendor().dialogue_open {
        if keyboard.just_pressed(KeyCode::Digit1) {
            inbox.push(ItemKind::Sword);
        }
        if keyboard.just_pressed(KeyCode::Digit2) {
            inbox.push(ItemKind::Armor);
        }
    }
}

/// Maps a simulation position into bevy's y-up world space.
#[must_use]
pub const fn to_gizmo_space(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

/// Centres every [`CameraController`] camera on the simulation viewport.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sync_camera_system(
    state: Res<SimulationState>,
    mut cameras: Query<&mut Transform, With<CameraController>>,
) {
    let view = state.0.camera();
    let centre = to_gizmo_space(view.origin + view.viewport * 0.5);
    for mut transform in &mut cameras {
        transform.translation.x = centre.x;
        transform.translation.y = centre.y;
    }
}

/// Draws the current frame with gizmos.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn draw_frame_system(state: Res<SimulationState>, mut gizmos: Gizmos) {
    let frame = state.0.frame();
    GizmoRenderer {
        gizmos: &mut gizmos,
        reach: reach(frame.player, &state.0.config().combat),
    }
    .draw(&frame);
}

const GRASS_EDGE: Color = Color::srgb(0.18, 0.35, 0.16);
const DIRT: Color = Color::srgb(0.71, 0.54, 0.37);
const STONE: Color = Color::srgb(0.68, 0.70, 0.72);
const HOUSE: Color = Color::srgb(0.55, 0.33, 0.22);
const TREE: Color = Color::srgb(0.20, 0.55, 0.25);
const ROCK: Color = Color::srgb(0.50, 0.50, 0.52);
const MONSTER: Color = Color::srgb(0.80, 0.25, 0.30);
const VENDOR: Color = Color::srgb(0.95, 0.75, 0.30);
const PLAYER: Color = Color::srgb(0.24, 0.42, 0.69);
const SAFE_INSIDE: Color = Color::srgb(0.28, 0.90, 0.60);
const SAFE_OUTSIDE: Color = Color::srgb(1.0, 0.42, 0.42);

/// [`Renderer`] drawing outlines with bevy gizmos.
pub struct GizmoRenderer<'a, 'w, 's> {
    /// Gizmo buffer for this frame.
    pub gizmos: &'a mut Gizmos<'w, 's>,
    /// Length of the swing indicator.
    pub reach: f32,
}

impl GizmoRenderer<'_, '_, '_> {
    fn draw_body(&mut self, body: &SolidBody, color: Color) {
        match body {
            SolidBody::Rect(rect) => {
                let center = to_gizmo_space(rect.center());
                self.gizmos.rect_2d(center, rect.size(), color);
            }
            SolidBody::Circle(circle) => {
                let center = to_gizmo_space(circle.center);
                self.gizmos.circle_2d(center, circle.radius, color);
            }
        }
    }

    fn draw_paths(&mut self, frame: &RenderFrame<'_>) {
        for path in frame.world.paths() {
            let color = match path.surface {
                PathSurface::Dirt => DIRT,
                PathSurface::Stone => STONE,
            };
            let points = path
                .points
                .iter()
                .filter(|p| frame.camera.is_visible(**p, path.width))
                .map(|p| to_gizmo_space(*p));
            self.gizmos.linestrip_2d(points, color);
        }
    }

    fn draw_player(&mut self, frame: &RenderFrame<'_>) {
        let player = frame.player;
        let center = to_gizmo_space(player.position);
        let color = if frame.purse().owns(Equipment::Armor) {
            STONE
        } else {
            PLAYER
        };
        self.gizmos.rect_2d(center, player.size, color);
        if player.is_swinging() {
            // Gizmo space is y-up.
            let facing = player.facing.as_vec() * Vec2::new(1.0, -1.0);
            self.gizmos
                .line_2d(center, center + facing * self.reach, Color::WHITE);
        }
    }
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        let size = frame.world.size();
        let bounds_center = to_gizmo_space(size * 0.5);
        self.gizmos.rect_2d(bounds_center, size, GRASS_EDGE);
        self.draw_paths(frame);

        let safe = frame.world.safe_zone();
        let safe_color = if frame.player_in_safe_zone {
            SAFE_INSIDE
        } else {
            SAFE_OUTSIDE
        };
        self.gizmos
            .circle_2d(to_gizmo_space(safe.center), safe.radius, safe_color);

        for item in &frame.draw_order {
            match *item {
                DrawItem::Obstacle(index) => {
                    let Some(obstacle) = frame.obstacle(index) else {
                        continue;
                    };
                    let color = match obstacle.kind {
                        ObstacleKind::House => HOUSE,
                        ObstacleKind::Tree => TREE,
                        ObstacleKind::Rock => ROCK,
                    };
                    self.draw_body(&obstacle.body, color);
                }
                DrawItem::Vendor => {
                    let vendor = frame.vendor;
                    let center = to_gizmo_space(vendor.position);
                    self.gizmos.circle_2d(center, vendor.radius, VENDOR);
                    if vendor.dialogue_open {
                        self.gizmos
                            .circle_2d(center, vendor.interaction_radius, VENDOR.with_alpha(0.4));
                    }
                }
                DrawItem::Monster(index) => {
                    let Some(monster) = frame.monsters.get(index) else {
                        continue;
                    };
                    if frame.camera.is_visible(monster.position, monster.radius) {
                        let center = to_gizmo_space(monster.position);
                        self.gizmos.circle_2d(center, monster.radius, MONSTER);
                    }
                }
                DrawItem::Player => self.draw_player(frame),
            }
        }
    }
}
