//! A simulation session shared across rspec closures.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use wildlands::config::SimulationConfig;
use wildlands::simulation::{SimEvent, SimulationContext, StepReport};

/// Session plus the reports of every step taken since the last reset.
#[derive(Clone, Default)]
pub struct SharedSession {
    sim: Arc<Mutex<Option<SimulationContext>>>,
    reports: Arc<Mutex<Vec<StepReport>>>,
}

impl fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self.reports.lock().map_or(0, |r| r.len());
        f.debug_struct("SharedSession").field("steps", &steps).finish()
    }
}

impl SharedSession {
    /// Replaces the session with a fresh one and forgets earlier reports.
    pub fn reset(&self, config: SimulationConfig, seed: u64) {
        *self.sim.lock().expect("session lock") = Some(test_utils::sim::session(config, seed));
        self.reports.lock().expect("reports lock").clear();
    }

    /// Runs `f` against the live session.
    pub fn with<R>(&self, f: impl FnOnce(&mut SimulationContext) -> R) -> R {
        let mut guard = self.sim.lock().expect("session lock");
        let sim = guard.as_mut().expect("session not started");
        f(sim)
    }

    /// Records a report produced by a step.
    pub fn record(&self, report: StepReport) {
        self.reports.lock().expect("reports lock").push(report);
    }

    /// Every event recorded since the last reset.
    pub fn events(&self) -> Vec<SimEvent> {
        test_utils::sim::events(&self.reports())
    }

    fn reports(&self) -> MutexGuard<'_, Vec<StepReport>> {
        self.reports.lock().expect("reports lock")
    }
}
