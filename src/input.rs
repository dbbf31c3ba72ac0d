//! Player intent supplied once per tick by the host.
//!
//! The simulation never sees key codes; hosts translate whatever devices
//! they have into an [`InputIntent`].

use glam::Vec2;

/// Directional key states.
///
/// Captures the pressed state of movement keys (WASD or arrow keys) to
/// compute a movement direction vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly four directional keys."
)]
pub struct DirectionalKeys {
    /// Whether an "up" key is pressed.
    pub up: bool,
    /// Whether a "down" key is pressed.
    pub down: bool,
    /// Whether a "left" key is pressed.
    pub left: bool,
    /// Whether a "right" key is pressed.
    pub right: bool,
}

/// Computes a normalised movement direction from the given key states.
///
/// World y grows downward, so "up" maps to negative y. Returns `Vec2::ZERO`
/// when no keys are pressed or opposing keys cancel. Diagonals are
/// normalised so they are not faster than cardinal movement.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::input::{compute_move_direction, DirectionalKeys};
///
/// let up = compute_move_direction(DirectionalKeys { up: true, ..Default::default() });
/// assert_eq!(up, Vec2::new(0.0, -1.0));
///
/// let diag = compute_move_direction(DirectionalKeys { down: true, right: true, ..Default::default() });
/// assert!((diag.length() - 1.0).abs() < 0.001);
/// ```
#[must_use]
pub fn compute_move_direction(keys: DirectionalKeys) -> Vec2 {
    /// Maps a negative/positive key pair to an axis value.
    const fn axis(neg: bool, pos: bool) -> f32 {
        match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    let raw = Vec2::new(axis(keys.left, keys.right), axis(keys.up, keys.down));
    raw.normalize_or_zero()
}

/// Everything the player asked for during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Normalised movement direction, zero when idle.
    pub direction: Vec2,
    /// Attack requested (level signal; the cooldown gates repeats).
    pub attack: bool,
    /// Talk to the vendor.
    pub interact: bool,
    /// Close the vendor dialogue.
    pub dismiss: bool,
    /// Pointer position in viewport coordinates, when one exists.
    pub pointer_screen: Option<Vec2>,
}

impl InputIntent {
    /// Intent to walk in `direction` (normalised here).
    #[must_use]
    pub fn walk(direction: Vec2) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            ..Self::default()
        }
    }

    /// Intent to swing at whatever is in reach.
    #[must_use]
    pub fn attack() -> Self {
        Self {
            attack: true,
            ..Self::default()
        }
    }

    /// Intent to talk to the vendor.
    #[must_use]
    pub fn interact() -> Self {
        Self {
            interact: true,
            ..Self::default()
        }
    }

    /// Direction with non-finite input replaced by zero and length capped at 1.
    #[must_use]
    pub fn sanitised_direction(&self) -> Vec2 {
        if !self.direction.is_finite() {
            return Vec2::ZERO;
        }
        if self.direction.length_squared() > 1.0 {
            self.direction.normalize_or_zero()
        } else {
            self.direction
        }
    }
}
