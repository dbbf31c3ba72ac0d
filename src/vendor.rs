//! The village blacksmith and its dialogue lifecycle.
//!
//! Talking opens the shop dialogue when the player stands close enough. The
//! dialogue closes when dismissed, or once the player has been out of reach
//! for the configured linger time.

use glam::Vec2;
use log::debug;
use serde::Serialize;

use crate::config::VendorConfig;
use crate::entity::HasPosition;

/// Why the dialogue closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CloseReason {
    /// The player closed it.
    Dismissed,
    /// The player stayed out of reach until the linger timer ran out.
    WalkedAway,
}

/// Visibility transition of the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DialogueChange {
    /// The dialogue became visible.
    Opened,
    /// The dialogue was hidden.
    Closed(CloseReason),
}

/// Stationary shopkeeper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vendor {
    /// Where the blacksmith stands.
    pub position: Vec2,
    /// Body radius used for drawing.
    pub radius: f32,
    /// Distance within which the player can talk and trade.
    pub interaction_radius: f32,
    /// Whether the shop dialogue is visible.
    pub dialogue_open: bool,
    /// Seconds left before an unattended dialogue closes.
    pub dialogue_timer: f32,
    linger: f32,
}

impl Vendor {
    /// Places the blacksmith at `position`.
    #[must_use]
    pub const fn new(position: Vec2, config: &VendorConfig) -> Self {
        Self {
            position,
            radius: config.radius,
            interaction_radius: config.interaction_radius,
            dialogue_open: false,
            dialogue_timer: 0.0,
            linger: config.dialogue_linger.max(0.0),
        }
    }

    /// Whether `point` is close enough to talk or trade.
    #[must_use]
    pub fn in_reach(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.interaction_radius
    }

    /// Applies this tick's dialogue input and timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use wildlands::config::VendorConfig;
    /// use wildlands::vendor::{DialogueChange, Vendor};
    ///
    /// let mut vendor = Vendor::new(Vec2::ZERO, &VendorConfig::default());
    /// let change = vendor.update_dialogue(Vec2::new(10.0, 0.0), true, false, 0.016);
    /// assert_eq!(change, Some(DialogueChange::Opened));
    /// assert!(vendor.dialogue_open);
    /// ```
    pub fn update_dialogue(
        &mut self,
        player: Vec2,
        interact: bool,
        dismiss: bool,
        dt: f32,
    ) -> Option<DialogueChange> {
        let in_reach = self.in_reach(player);
        if self.dialogue_open && dismiss {
            return Some(self.close(CloseReason::Dismissed));
        }
        if !self.dialogue_open {
            if interact && in_reach {
                self.dialogue_open = true;
                self.dialogue_timer = self.linger;
                debug!("vendor dialogue opened");
                return Some(DialogueChange::Opened);
            }
            return None;
        }
        if in_reach {
            self.dialogue_timer = self.linger;
            return None;
        }
        self.dialogue_timer -= dt;
        if self.dialogue_timer <= 0.0 {
            return Some(self.close(CloseReason::WalkedAway));
        }
        None
    }

    fn close(&mut self, reason: CloseReason) -> DialogueChange {
        self.dialogue_open = false;
        self.dialogue_timer = 0.0;
        debug!("vendor dialogue closed: {reason:?}");
        DialogueChange::Closed(reason)
    }
}

impl HasPosition for Vendor {
    fn position(&self) -> Vec2 {
        self.position
    }
}
