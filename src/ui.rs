//! Dialogue and shop UI collaborator.
//!
//! The simulation reports dialogue transitions and purchase outcomes as
//! [`SimEvent`]s; [`forward_events`] hands the relevant ones to whatever
//! widget layer the host provides.

use log::info;

use crate::economy::Notification;
use crate::simulation::SimEvent;
use crate::vendor::CloseReason;

/// Widget layer showing the shop dialogue and purchase notifications.
#[cfg_attr(test, mockall::automock)]
pub trait DialogueUi {
    /// Shows the shop dialogue.
    fn open(&mut self);

    /// Hides the shop dialogue.
    fn close(&mut self, reason: CloseReason);

    /// Shows a transient purchase notification.
    fn notify(&mut self, notification: &Notification);
}

/// Passes dialogue and purchase events to `ui`, ignoring the rest.
pub fn forward_events<U: DialogueUi + ?Sized>(ui: &mut U, events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::DialogueOpened => ui.open(),
            SimEvent::DialogueClosed(reason) => ui.close(*reason),
            SimEvent::Purchase(notification) => ui.notify(notification),
            _ => {}
        }
    }
}

/// [`DialogueUi`] that writes to the log and remembers what it showed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDialogueUi {
    /// Whether the dialogue is currently shown.
    pub visible: bool,
    /// Most recent notification text.
    pub last_message: Option<String>,
}

impl DialogueUi for LogDialogueUi {
    fn open(&mut self) {
        self.visible = true;
        info!("blacksmith: 1 = sword, 2 = armor, Esc to leave");
    }

    fn close(&mut self, reason: CloseReason) {
        self.visible = false;
        info!("blacksmith dialogue closed ({reason:?})");
    }

    fn notify(&mut self, notification: &Notification) {
        let message = notification.to_string();
        info!("{message}");
        self.last_message = Some(message);
    }
}
