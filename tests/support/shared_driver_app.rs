//! A headless driver app shared across rspec closures.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::App;
use wildlands::driver::SimulationState;

/// Slot holding the app built by the current example's setup.
struct DriverSlot(Option<App>);

// SAFETY: the driver app is `!Send` only through the runner boxed by
// `MinimalPlugins`, which these tests never call: frames advance through
// `App::update` alone. The resources the driver inserts are all `Send`,
// including the `DialogueUiHandle` wrapping the recording UI. `run_serial`
// executes every example on the test thread, and the app is reached only
// through `SharedDriverApp::with`, which holds the mutex for the whole call.
unsafe impl Send for DriverSlot {}
unsafe impl Sync for DriverSlot {}

/// Cloneable handle to the app under test.
#[derive(Clone)]
pub struct SharedDriverApp(Arc<Mutex<DriverSlot>>);

impl Default for SharedDriverApp {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(DriverSlot(None))))
    }
}

impl fmt::Debug for SharedDriverApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tick = self.try_with(|app| {
            app.world()
                .get_resource::<SimulationState>()
                .map(|state| state.0.tick())
        });
        f.debug_struct("SharedDriverApp")
            .field("tick", &tick.flatten())
            .finish()
    }
}

impl SharedDriverApp {
    /// Replaces the app, dropping whatever the previous example left behind.
    pub fn install(&self, app: App) {
        self.slot().0 = Some(app);
    }

    /// Runs `f` against the installed app.
    pub fn with<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        self.try_with(f).expect("driver app not installed")
    }

    /// Advances the app by `frames` updates.
    pub fn frames(&self, frames: usize) {
        self.with(|app| {
            for _ in 0..frames {
                app.update();
            }
        });
    }

    fn try_with<R>(&self, f: impl FnOnce(&mut App) -> R) -> Option<R> {
        self.slot().0.as_mut().map(f)
    }

    fn slot(&self) -> MutexGuard<'_, DriverSlot> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
