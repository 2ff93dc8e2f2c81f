use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gesture::DetectorState;
use crate::sos::{DispatchOutcome, LocationStatus};

/// Every state change in the system produces an Event.
/// Hosts print or forward them; nothing in the core consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A qualifying key press that did not reach the threshold.
    PressCounted {
        count: u32,
        at: DateTime<Utc>,
    },
    /// The burst stalled and the pending reset fired.
    PressCounterReset {
        at: DateTime<Utc>,
    },
    /// The threshold press; the key event is consumed.
    SosTriggered {
        at: DateTime<Utc>,
    },
    DetectorSnapshot {
        state: DetectorState,
        press_count: u32,
        last_press_ms: Option<u64>,
        reset_deadline_ms: Option<u64>,
        at: DateTime<Utc>,
    },
    SosDispatched {
        outcome: DispatchOutcome,
        location: LocationStatus,
        sent: usize,
        failed: usize,
        at: DateTime<Utc>,
    },
    ContactAdded {
        name: String,
        phone: String,
        at: DateTime<Utc>,
    },
    ContactDeleted {
        name: String,
        phone: String,
        at: DateTime<Utc>,
    },
    IncidentPosted {
        title: String,
        timestamp: i64,
        at: DateTime<Utc>,
    },
}
