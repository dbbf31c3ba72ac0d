#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the Wildlands simulation.
//!
//! The core is a deterministic, single-threaded [`SimulationContext`]
//! stepped once per frame. Bevy appears only in the thin [`driver`] and,
//! behind the `render` feature, the [`presentation`] layer.
pub mod camera;
pub mod collision;
pub mod combat;
pub mod config;
pub mod constants;
pub mod driver;
pub mod economy;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod movement;
pub mod noise;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod render;
pub mod simulation;
pub mod steering;
pub mod ui;
pub mod vector_math;
pub mod vendor;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use camera::Camera;
pub use collision::{try_move, Mover};
pub use config::SimulationConfig;
pub use driver::{InputState, LastStepReport, PurchaseInbox, SimulationPlugin, SimulationState};
pub use economy::{purchase, Equipment, ItemKind, Notification, PriceList, Purse};
pub use entity::{EntityRef, Facing, Monster, MonsterId, Player};
pub use error::{ConfigError, PlacementExhausted, PurchaseError};
pub use input::InputIntent;
pub use logging::init as init_logging;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use render::{RenderFrame, Renderer};
pub use simulation::{SimEvent, SimulationContext, StepReport};
pub use ui::DialogueUi;
pub use vector_math::{clamp_length, try_direction, vec_normalize};
pub use world::World;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use wildlands::prelude::*;
    //! ```

    pub use crate::config::SimulationConfig;
    pub use crate::economy::ItemKind;
    pub use crate::input::InputIntent;
    pub use crate::simulation::{SimEvent, SimulationContext};
    pub use glam::Vec2;
}
