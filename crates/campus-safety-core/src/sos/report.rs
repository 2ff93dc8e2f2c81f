//! Per-contact delivery results for one SOS.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::LocationStatus;
use crate::events::Event;

/// Result of sending to a single contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub name: String,
    pub phone: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    /// Not retried.
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Nothing was sent because no contacts are stored.
    NoContacts,
    /// At least one contact received the message.
    Sent,
    /// Every send failed.
    AllFailed,
}

/// Log of one SOS fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    pub dispatched_at: DateTime<Utc>,
    pub outcome: DispatchOutcome,
    pub location: LocationStatus,
    /// `None` when no message was composed.
    pub message: Option<String>,
    pub results: Vec<DeliveryResult>,
}

impl DispatchReport {
    pub fn no_contacts() -> Self {
        Self {
            dispatched_at: Utc::now(),
            outcome: DispatchOutcome::NoContacts,
            location: LocationStatus::NotRequested,
            message: None,
            results: Vec::new(),
        }
    }

    pub fn new(location: LocationStatus, message: String, results: Vec<DeliveryResult>) -> Self {
        let any_sent = results.iter().any(|r| r.status == DeliveryStatus::Sent);
        Self {
            dispatched_at: Utc::now(),
            outcome: if any_sent {
                DispatchOutcome::Sent
            } else {
                DispatchOutcome::AllFailed
            },
            location,
            message: Some(message),
            results,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, DeliveryStatus::Sent))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, DeliveryStatus::Failed { .. }))
            .count()
    }

    pub fn to_event(&self) -> Event {
        Event::SosDispatched {
            outcome: self.outcome,
            location: self.location.clone(),
            sent: self.sent_count(),
            failed: self.failed_count(),
            at: self.dispatched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, status: DeliveryStatus) -> DeliveryResult {
        DeliveryResult {
            name: name.to_string(),
            phone: "1".to_string(),
            status,
        }
    }

    #[test]
    fn counts_and_outcome() {
        let report = DispatchReport::new(
            LocationStatus::NoFix,
            "msg".to_string(),
            vec![
                result("a", DeliveryStatus::Sent),
                result("b", DeliveryStatus::Failed { reason: "x".into() }),
            ],
        );
        assert_eq!(report.sent_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.outcome, DispatchOutcome::Sent);
    }

    #[test]
    fn all_failures_is_all_failed() {
        let report = DispatchReport::new(
            LocationStatus::NotRequested,
            "msg".to_string(),
            vec![result("a", DeliveryStatus::Failed { reason: "x".into() })],
        );
        assert_eq!(report.outcome, DispatchOutcome::AllFailed);
    }

    #[test]
    fn no_contacts_report_is_empty() {
        let report = DispatchReport::no_contacts();
        assert_eq!(report.outcome, DispatchOutcome::NoContacts);
        assert!(report.message.is_none());
        assert_eq!(report.sent_count() + report.failed_count(), 0);
    }
}
