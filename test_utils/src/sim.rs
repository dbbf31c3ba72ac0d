//! Helpers for driving a [`SimulationContext`] through scripted input.

use glam::Vec2;
use wildlands::config::SimulationConfig;
use wildlands::input::InputIntent;
use wildlands::simulation::{SimEvent, SimulationContext, StepReport};

/// Fixed step used by scripted sessions.
pub const STEP: f32 = 1.0 / 60.0;

/// Creates a session, panicking on an invalid configuration.
///
/// # Panics
/// Panics when `config` fails validation.
#[must_use]
pub fn session(config: SimulationConfig, seed: u64) -> SimulationContext {
    SimulationContext::new(config, seed)
        .unwrap_or_else(|e| panic!("test configuration rejected: {e}"))
}

/// Steps `sim` `ticks` times with the same input, returning every report.
pub fn run(sim: &mut SimulationContext, input: &InputIntent, ticks: usize) -> Vec<StepReport> {
    (0..ticks).map(|_| sim.step(input, STEP)).collect()
}

/// Every event of `reports`, in order.
#[must_use]
pub fn events(reports: &[StepReport]) -> Vec<SimEvent> {
    reports.iter().flat_map(|r| r.events.iter().cloned()).collect()
}

/// Moves the player next to the vendor without simulating the walk.
pub fn stand_by_vendor(sim: &mut SimulationContext) {
    let spot = sim.vendor().position + Vec2::new(0.0, 10.0);
    sim.player_mut().position = spot;
}
