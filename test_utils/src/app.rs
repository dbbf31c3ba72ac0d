//! Headless bevy app running the simulation driver.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use wildlands::config::SimulationConfig;
use wildlands::driver::SimulationPlugin;

/// Builds an app with `MinimalPlugins` and the simulation driver, advancing
/// time by a fixed `step` on every update.
#[must_use]
pub fn driver_app(config: SimulationConfig, seed: u64, step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .add_plugins(SimulationPlugin { config, seed });
    app
}
