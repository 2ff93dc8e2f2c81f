//! Background volume-key listener.
//!
//! Filters raw key events down to volume-down key-downs and feeds them to a
//! [`GestureDetector`]. Everything else passes through untouched.

use serde::{Deserialize, Serialize};

use super::detector::{GestureDetector, PressOutcome};
use crate::notice::{Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    VolumeDown,
    VolumeUp,
    Power,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self { key, action: KeyAction::Down }
    }

    pub fn up(key: Key) -> Self {
        Self { key, action: KeyAction::Up }
    }

    fn is_qualifying(&self) -> bool {
        self.key == Key::VolumeDown && self.action == KeyAction::Down
    }
}

/// What the host should do with a key event it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Not a volume-down press; default handling applies.
    Ignored,
    /// Counted toward a burst; default handling applies.
    PassThrough { count: u32 },
    /// Burst complete: suppress the default effect and send the SOS.
    TriggerSos,
}

impl KeyDisposition {
    pub fn consumed(self) -> bool {
        matches!(self, KeyDisposition::TriggerSos)
    }
}

#[derive(Debug, Default)]
pub struct SosShortcut {
    detector: GestureDetector,
}

impl SosShortcut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously persisted detector.
    pub fn with_detector(detector: GestureDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut GestureDetector {
        &mut self.detector
    }

    pub fn into_detector(self) -> GestureDetector {
        self.detector
    }

    pub fn on_key_event(
        &mut self,
        event: &KeyEvent,
        now_ms: u64,
        notifier: &dyn Notifier,
    ) -> KeyDisposition {
        if !event.is_qualifying() {
            return KeyDisposition::Ignored;
        }

        match self.detector.on_press(now_ms) {
            PressOutcome::Counted { count } => KeyDisposition::PassThrough { count },
            PressOutcome::Triggered => {
                notifier.notify(&Notice::SosTriggered);
                KeyDisposition::TriggerSos
            }
        }
    }

    /// Listener teardown: no reset may fire afterwards.
    pub fn shutdown(&mut self) {
        self.detector.cancel();
    }
}
