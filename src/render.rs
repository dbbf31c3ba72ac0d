//! Read-only view of a simulation tick for drawing.
//!
//! The simulation never draws. Hosts implement [`Renderer`] and receive a
//! [`RenderFrame`] borrowing the session state, together with a draw order
//! sorted by each item's base y so nearer things overlap farther ones.

use std::cmp::Ordering;

use crate::camera::Camera;
use crate::economy::Purse;
use crate::entity::{EntityRef, Monster, Player};
use crate::vendor::Vendor;
use crate::world::{Obstacle, World};

/// Something to draw, referring into the frame's collections by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawItem {
    /// Index into [`World::obstacles`].
    Obstacle(usize),
    /// The blacksmith.
    Vendor,
    /// Index into [`RenderFrame::monsters`].
    Monster(usize),
    /// The avatar.
    Player,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    /// Static geometry.
    pub world: &'a World,
    /// Viewport placement.
    pub camera: &'a Camera,
    /// The avatar.
    pub player: &'a Player,
    /// Live monsters.
    pub monsters: &'a [Monster],
    /// The blacksmith.
    pub vendor: &'a Vendor,
    /// Whether the player stands inside the safe zone.
    pub player_in_safe_zone: bool,
    /// Depth-sorted drawing order, farthest first.
    pub draw_order: Vec<DrawItem>,
}

impl<'a> RenderFrame<'a> {
    /// Builds a frame and its depth-sorted draw order.
    ///
    /// Items are ordered by base y: the bottom edge for houses, the centre
    /// for everything else. Ties keep scenery before the vendor, monsters
    /// and the player, in that order.
    #[must_use]
    pub fn new(
        world: &'a World,
        camera: &'a Camera,
        player: &'a Player,
        monsters: &'a [Monster],
        vendor: &'a Vendor,
    ) -> Self {
        let mut keyed: Vec<(f32, DrawItem)> = world
            .obstacles()
            .iter()
            .enumerate()
            .map(|(i, obstacle)| (obstacle.body.base_y(), DrawItem::Obstacle(i)))
            .collect();
        keyed.push((vendor.position.y, DrawItem::Vendor));
        keyed.extend(
            monsters
                .iter()
                .enumerate()
                .map(|(i, monster)| (monster.position.y, DrawItem::Monster(i))),
        );
        keyed.push((player.position.y, DrawItem::Player));
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        Self {
            world,
            camera,
            player,
            monsters,
            vendor,
            player_in_safe_zone: world.is_in_safe_zone(player.position),
            draw_order: keyed.into_iter().map(|(_, item)| item).collect(),
        }
    }

    /// The player's coins and equipment.
    #[must_use]
    pub const fn purse(&self) -> &'a Purse {
        &self.player.purse
    }

    /// Obstacle referenced by a [`DrawItem::Obstacle`].
    #[must_use]
    pub fn obstacle(&self, index: usize) -> Option<&'a Obstacle> {
        self.world.obstacles().get(index)
    }

    /// Actor referenced by a draw item; `None` for scenery.
    #[must_use]
    pub fn entity(&self, item: DrawItem) -> Option<EntityRef<'a>> {
        match item {
            DrawItem::Obstacle(_) => None,
            DrawItem::Vendor => Some(EntityRef::Vendor(self.vendor)),
            DrawItem::Monster(i) => self.monsters.get(i).map(EntityRef::Monster),
            DrawItem::Player => Some(EntityRef::Player(self.player)),
        }
    }
}

/// Draws frames. Implemented by the host's presentation layer.
pub trait Renderer {
    /// Draws one frame.
    fn draw(&mut self, frame: &RenderFrame<'_>);
}
