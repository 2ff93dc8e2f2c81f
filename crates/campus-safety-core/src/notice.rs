//! Short transient messages surfaced to the user.
//!
//! The host decides how to show them (a toast, a status line, stderr).

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ContactAdded,
    ContactDeleted,
    ContactsLoadFailed,
    FeedLoadFailed,
    IncidentPosted,
    NoContacts,
    LocationPermissionNeeded,
    SendFailed { name: String },
    SosSent { count: usize },
    SosFailed,
    SosTriggered,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ContactAdded => f.write_str("Contact added"),
            Notice::ContactDeleted => f.write_str("Contact deleted"),
            Notice::ContactsLoadFailed => f.write_str("Error loading contacts."),
            Notice::FeedLoadFailed => f.write_str("Error loading feed."),
            Notice::IncidentPosted => f.write_str("Incident posted"),
            Notice::NoContacts => f.write_str("No emergency contacts added."),
            Notice::LocationPermissionNeeded => f.write_str("Location permission needed for SOS."),
            Notice::SendFailed { name } => write!(f, "Could not send to {name}"),
            Notice::SosSent { count } => write!(f, "SOS sent to {count} contact(s)."),
            Notice::SosFailed => f.write_str("Failed to send SOS to any contacts."),
            Notice::SosTriggered => f.write_str("SOS Triggered!"),
        }
    }
}

/// Where notices go.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Swallows every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Keeps every notice in order; handy for hosts that batch their output.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
