//! Bevy plugin driving a [`SimulationContext`] from the frame schedule.
//!
//! The driver is deliberately thin: it owns the context as a resource,
//! collects purchase requests in [`PurchaseInbox`], steps the simulation
//! once per `Update` with the frame's delta time and forwards dialogue
//! events to the configured [`DialogueUi`]. Input capture belongs to the
//! presentation layer, which writes [`InputState`] in
//! [`SimulationSet::Input`].

use bevy::prelude::*;
use log::error;

use crate::config::SimulationConfig;
use crate::economy::ItemKind;
use crate::input::InputIntent;
use crate::simulation::{SimulationContext, StepReport};
use crate::ui::{forward_events, DialogueUi, LogDialogueUi};

/// Ordering of the driver's systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Hosts write [`InputState`] and [`PurchaseInbox`] here.
    Input,
    /// The simulation steps.
    Step,
    /// Results are forwarded and drawn.
    Present,
}

/// The session, owned by the ECS world.
#[derive(Resource, Debug)]
pub struct SimulationState(pub SimulationContext);

/// Player intent for the coming step.
///
/// `attack` and `direction` are level signals re-written every frame.
/// `interact` and `dismiss` are edge signals cleared after each step.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState(pub InputIntent);

/// Purchase requests waiting for the next step.
#[derive(Resource, Debug, Default)]
pub struct PurchaseInbox {
    items: Vec<ItemKind>,
}

impl PurchaseInbox {
    /// Queues a purchase request.
    pub fn push(&mut self, item: ItemKind) {
        self.items.push(item);
    }

    /// Removes and yields every queued request in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, ItemKind> {
        self.items.drain(..)
    }

    /// Whether no requests are queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The report of the most recent step.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct LastStepReport(pub StepReport);

/// The dialogue widget layer receiving forwarded events.
#[derive(Resource)]
pub struct DialogueUiHandle(pub Box<dyn DialogueUi + Send + Sync>);

impl Default for DialogueUiHandle {
    fn default() -> Self {
        Self(Box::new(LogDialogueUi::default()))
    }
}

/// Plugin inserting the session resources and the step systems.
#[derive(Debug, Clone, Default)]
pub struct SimulationPlugin {
    /// Session configuration.
    pub config: SimulationConfig,
    /// Seed for world generation and all session randomness.
    pub seed: u64,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let context = match SimulationContext::new(self.config.clone(), self.seed) {
            Ok(context) => context,
            Err(e) => {
                error!("failed to start simulation: {e}");
                return;
            }
        };
        app.insert_resource(SimulationState(context));
        app.init_resource::<InputState>();
        app.init_resource::<PurchaseInbox>();
        app.init_resource::<LastStepReport>();
        if !app.world().contains_resource::<DialogueUiHandle>() {
            app.init_resource::<DialogueUiHandle>();
        }
        app.configure_sets(
            Update,
            (SimulationSet::Input, SimulationSet::Step, SimulationSet::Present).chain(),
        );
        app.add_systems(
            Update,
            (
                step_simulation_system.in_set(SimulationSet::Step),
                forward_ui_events_system.in_set(SimulationSet::Present),
            ),
        );
    }
}

/// Steps the session with this frame's delta time.
///
/// Queued purchases are handed over first so they resolve in this step.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn step_simulation_system(
    time: Res<Time>,
    mut state: ResMut<SimulationState>,
    mut input: ResMut<InputState>,
    mut inbox: ResMut<PurchaseInbox>,
    mut report: ResMut<LastStepReport>,
) {
    let context = &mut state.0;
    for item in inbox.drain() {
        context.request_purchase(item);
    }
    report.0 = context.step(&input.0, time.delta_secs());
    input.0.interact = false;
    input.0.dismiss = false;
}

/// Hands dialogue and purchase events of the last step to the UI.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn forward_ui_events_system(report: Res<LastStepReport>, mut ui: ResMut<DialogueUiHandle>) {
    forward_events(ui.0.as_mut(), &report.0.events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn inbox_drains_in_order() {
        let mut inbox = PurchaseInbox::default();
        assert!(inbox.is_empty());
        inbox.push(ItemKind::Armor);
        inbox.push(ItemKind::Sword);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![ItemKind::Armor, ItemKind::Sword]);
        assert!(inbox.is_empty());
    }

    #[test]
    fn invalid_config_leaves_app_without_state() {
        let mut app = App::new();
        let mut config = SimulationConfig::default();
        config.monsters.hp = 0;
        app.add_plugins(SimulationPlugin { config, seed: 1 });
        assert!(!app.world().contains_resource::<SimulationState>());
    }
}
