//! Repeated-press detector.
//!
//! Counts qualifying presses that arrive within [`TIME_WINDOW_MS`] of each
//! other and reports a trigger on the [`PRESS_THRESHOLD`]th one. Like the
//! rest of the core it owns no threads: the pending reset is a deadline, and
//! the host calls `tick()` when its timer fires.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Counting -> (Idle via trigger | Idle via timeout)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut detector = GestureDetector::new();
//! match detector.on_press(now_ms) {
//!     PressOutcome::Triggered => send_sos(),
//!     PressOutcome::Counted { .. } => {} // let the volume change
//! }
//! // When the host timer for `next_deadline_ms()` fires:
//! detector.tick(now_ms);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Presses needed within the window to trigger.
pub const PRESS_THRESHOLD: u32 = 3;
/// Maximum gap between consecutive presses of one burst.
pub const TIME_WINDOW_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorState {
    Idle,
    Counting,
}

/// Result of feeding one qualifying press to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Below threshold. The press is not consumed.
    Counted { count: u32 },
    /// Threshold reached. The press is consumed and the count is back to 0.
    Triggered,
}

impl PressOutcome {
    /// Whether the host must suppress the key's default effect.
    pub fn consumed(self) -> bool {
        matches!(self, PressOutcome::Triggered)
    }

    pub fn to_event(self) -> Event {
        match self {
            PressOutcome::Counted { count } => Event::PressCounted { count, at: Utc::now() },
            PressOutcome::Triggered => Event::SosTriggered { at: Utc::now() },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GestureDetector {
    press_count: u32,
    #[serde(default)]
    last_press_ms: Option<u64>,
    /// The single outstanding reset. `None` when nothing is scheduled.
    #[serde(default)]
    reset_deadline_ms: Option<u64>,
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn press_count(&self) -> u32 {
        self.press_count
    }

    pub fn last_press_ms(&self) -> Option<u64> {
        self.last_press_ms
    }

    /// When the host should call `tick()` next, if anything is pending.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.reset_deadline_ms
    }

    pub fn state(&self) -> DetectorState {
        if self.press_count == 0 {
            DetectorState::Idle
        } else {
            DetectorState::Counting
        }
    }

    pub fn snapshot(&self) -> Event {
        Event::DetectorSnapshot {
            state: self.state(),
            press_count: self.press_count,
            last_press_ms: self.last_press_ms,
            reset_deadline_ms: self.reset_deadline_ms,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Feed one qualifying press observed at `now_ms`.
    pub fn on_press(&mut self, now_ms: u64) -> PressOutcome {
        // A reset that came due before this press has already happened.
        self.tick(now_ms);
        self.reset_deadline_ms = None;

        let within_window = self
            .last_press_ms
            .is_some_and(|last| now_ms.saturating_sub(last) <= TIME_WINDOW_MS);
        self.press_count = if within_window { self.press_count + 1 } else { 1 };
        self.last_press_ms = Some(now_ms);

        if self.press_count >= PRESS_THRESHOLD {
            tracing::info!("SOS triggered via volume down");
            self.press_count = 0;
            return PressOutcome::Triggered;
        }

        tracing::debug!("Volume down pressed. Count: {}", self.press_count);
        self.reset_deadline_ms = Some(now_ms.saturating_add(TIME_WINDOW_MS));
        PressOutcome::Counted {
            count: self.press_count,
        }
    }

    /// Run the pending reset if it is due. Returns `Some(Event::PressCounterReset)`
    /// when it fires.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        let deadline = self.reset_deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        self.reset_deadline_ms = None;
        self.press_count = 0;
        tracing::debug!("Volume down press counter reset due to timeout");
        Some(Event::PressCounterReset { at: Utc::now() })
    }

    /// Drop the pending reset and any partial count.
    pub fn cancel(&mut self) {
        self.reset_deadline_ms = None;
        self.press_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_quick_presses_trigger() {
        let mut d = GestureDetector::new();
        assert_eq!(d.on_press(1_000), PressOutcome::Counted { count: 1 });
        assert_eq!(d.on_press(1_500), PressOutcome::Counted { count: 2 });
        assert_eq!(d.state(), DetectorState::Counting);
        let outcome = d.on_press(2_000);
        assert_eq!(outcome, PressOutcome::Triggered);
        assert!(outcome.consumed());
        assert_eq!(d.press_count(), 0);
        assert_eq!(d.state(), DetectorState::Idle);
        assert!(d.next_deadline_ms().is_none());
    }

    #[test]
    fn intermediate_presses_are_not_consumed() {
        let mut d = GestureDetector::new();
        assert!(!d.on_press(0).consumed());
        assert!(!d.on_press(100).consumed());
    }

    #[test]
    fn first_press_at_time_zero_starts_a_burst() {
        let mut d = GestureDetector::new();
        assert_eq!(d.on_press(0), PressOutcome::Counted { count: 1 });
        assert_eq!(d.on_press(10), PressOutcome::Counted { count: 2 });
    }

    #[test]
    fn press_after_trigger_starts_fresh() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        d.on_press(100);
        assert_eq!(d.on_press(200), PressOutcome::Triggered);
        assert_eq!(d.on_press(300), PressOutcome::Counted { count: 1 });
        assert_eq!(d.on_press(400), PressOutcome::Counted { count: 2 });
        assert_eq!(d.on_press(500), PressOutcome::Triggered);
    }

    #[test]
    fn slow_presses_never_trigger() {
        let mut d = GestureDetector::new();
        for i in 0..10 {
            assert_eq!(d.on_press(i * 2_500), PressOutcome::Counted { count: 1 });
        }
    }

    #[test]
    fn tick_resets_stalled_burst() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        d.on_press(1_000);
        assert_eq!(d.next_deadline_ms(), Some(3_000));
        assert!(d.tick(2_999).is_none());
        assert_eq!(d.press_count(), 2);
        assert!(matches!(d.tick(3_000), Some(Event::PressCounterReset { .. })));
        assert_eq!(d.press_count(), 0);
        assert!(d.tick(3_500).is_none());
    }

    #[test]
    fn gap_of_exactly_window_starts_new_burst() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        d.on_press(1_000);
        assert_eq!(d.on_press(3_000), PressOutcome::Counted { count: 1 });
    }

    #[test]
    fn each_press_rearms_the_reset() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        assert_eq!(d.next_deadline_ms(), Some(2_000));
        d.on_press(1_900);
        assert_eq!(d.next_deadline_ms(), Some(3_900));
        // The stale deadline at 2_000 no longer applies.
        assert!(d.tick(2_500).is_none());
        assert_eq!(d.press_count(), 2);
    }

    #[test]
    fn cancel_clears_pending_reset() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        d.cancel();
        assert_eq!(d.press_count(), 0);
        assert!(d.next_deadline_ms().is_none());
    }

    #[test]
    fn survives_serialization_between_presses() {
        let mut d = GestureDetector::new();
        d.on_press(0);
        d.on_press(500);
        let json = serde_json::to_string(&d).unwrap();
        let mut restored: GestureDetector = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.on_press(900), PressOutcome::Triggered);
    }

    #[test]
    fn snapshot_reports_counting_state() {
        let mut d = GestureDetector::new();
        d.on_press(42);
        match d.snapshot() {
            Event::DetectorSnapshot {
                state,
                press_count,
                last_press_ms,
                reset_deadline_ms,
                ..
            } => {
                assert_eq!(state, DetectorState::Counting);
                assert_eq!(press_count, 1);
                assert_eq!(last_press_ms, Some(42));
                assert_eq!(reset_deadline_ms, Some(2_042));
            }
            _ => panic!("Expected DetectorSnapshot"),
        }
    }
}
