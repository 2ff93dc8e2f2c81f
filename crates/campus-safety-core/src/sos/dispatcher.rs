//! SOS fan-out: contacts → optional location → one text per contact.

use super::location::{fetch_once, LocationProvider, LocationStatus};
use super::message::compose_message;
use super::report::{DeliveryResult, DeliveryStatus, DispatchReport};
use super::sms::SmsSender;
use crate::contacts::ContactBook;
use crate::error::Result;
use crate::notice::{Notice, Notifier};
use crate::storage::{KvStore, LocationConfig};

pub struct SosDispatcher<'a, S: KvStore + ?Sized> {
    store: &'a S,
    sms: &'a dyn SmsSender,
    location: &'a dyn LocationProvider,
    notifier: &'a dyn Notifier,
    config: LocationConfig,
}

impl<'a, S: KvStore + ?Sized> SosDispatcher<'a, S> {
    pub fn new(
        store: &'a S,
        sms: &'a dyn SmsSender,
        location: &'a dyn LocationProvider,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            sms,
            location,
            notifier,
            config: LocationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LocationConfig) -> Self {
        self.config = config;
        self
    }

    /// Send the SOS text to every stored contact.
    ///
    /// With `include_location`, exactly one location request is made and
    /// awaited for at most `location.timeout_ms`; any outcome other than a
    /// fix sends the "location unknown" message. A failed send is reported
    /// and the remaining contacts are still tried.
    ///
    /// # Errors
    /// Only if the contact list cannot be read from the store.
    pub async fn send_sos(&self, include_location: bool) -> Result<DispatchReport> {
        tracing::debug!("send_sos called. include_location: {include_location}");

        let book = ContactBook::load(self.store, self.notifier)?;
        if book.is_empty() {
            tracing::warn!("No emergency contacts found. Cannot send SOS.");
            self.notifier.notify(&Notice::NoContacts);
            return Ok(DispatchReport::no_contacts());
        }

        let location = if include_location {
            self.locate().await
        } else {
            LocationStatus::NotRequested
        };

        let message = compose_message(location.point());
        let mut results = Vec::with_capacity(book.len());

        for contact in book.contacts() {
            let status = match self.sms.send_text(contact.phone(), &message) {
                Ok(()) => {
                    tracing::info!("SOS SMS sent to: {} ({})", contact.name(), contact.phone());
                    DeliveryStatus::Sent
                }
                Err(e) => {
                    tracing::error!("Could not send SMS to {}: {e}", contact.name());
                    self.notifier.notify(&Notice::SendFailed {
                        name: contact.name().to_string(),
                    });
                    DeliveryStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            results.push(DeliveryResult {
                name: contact.name().to_string(),
                phone: contact.phone().to_string(),
                status,
            });
        }

        let report = DispatchReport::new(location, message, results);
        let sent = report.sent_count();
        if sent > 0 {
            self.notifier.notify(&Notice::SosSent { count: sent });
        } else {
            self.notifier.notify(&Notice::SosFailed);
        }
        Ok(report)
    }

    async fn locate(&self) -> LocationStatus {
        tracing::debug!("Attempting to get current location...");
        let status = fetch_once(self.location, &self.config.request(), self.config.timeout()).await;

        match &status {
            LocationStatus::Fixed { point } => {
                tracing::info!(
                    "Current location obtained: {}, {}",
                    point.latitude,
                    point.longitude
                );
            }
            LocationStatus::PermissionDenied => {
                tracing::warn!("Location permission not granted. Sending without location.");
                self.notifier.notify(&Notice::LocationPermissionNeeded);
            }
            LocationStatus::TimedOut { after_ms } => {
                tracing::warn!("No location fix after {after_ms} ms. Sending without location.");
            }
            other => {
                tracing::warn!("Failed to get current location ({other:?}). Sending without location.");
            }
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::RecordingNotifier;
    use crate::sos::{GeoPoint, OutboxSender, StaticLocation};
    use crate::storage::Database;

    fn seeded() -> Database {
        let db = Database::open_memory().unwrap();
        let mut book = ContactBook::load(&db, &crate::notice::SilentNotifier).unwrap();
        book.add("Mom", "111").unwrap();
        book.add("Dad", "222").unwrap();
        db
    }

    #[tokio::test]
    async fn sends_to_every_contact_with_link() {
        let db = seeded();
        let sms = OutboxSender::new();
        let loc = StaticLocation::at(GeoPoint::new(12.9, 77.5));
        let notifier = RecordingNotifier::new();

        let report = SosDispatcher::new(&db, &sms, &loc, &notifier)
            .send_sos(true)
            .await
            .unwrap();

        let sent = sms.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].phone, "111");
        assert_eq!(sent[1].phone, "222");
        assert!(sent[0].body.contains("https://maps.google.com/?q=12.9,77.5"));
        assert_eq!(report.sent_count(), 2);
        assert_eq!(notifier.notices(), vec![Notice::SosSent { count: 2 }]);
    }

    #[tokio::test]
    async fn without_location_request_skips_provider() {
        let db = seeded();
        let sms = OutboxSender::new();
        // Would notify if it were asked.
        let loc = StaticLocation::denied();
        let notifier = RecordingNotifier::new();

        let report = SosDispatcher::new(&db, &sms, &loc, &notifier)
            .send_sos(false)
            .await
            .unwrap();

        assert_eq!(report.location, LocationStatus::NotRequested);
        assert!(sms.sent()[0].body.ends_with("My location is unknown."));
        assert!(!notifier.notices().contains(&Notice::LocationPermissionNeeded));
    }

    #[tokio::test]
    async fn permission_denied_still_sends() {
        let db = seeded();
        let sms = OutboxSender::new();
        let loc = StaticLocation::denied();
        let notifier = RecordingNotifier::new();

        let report = SosDispatcher::new(&db, &sms, &loc, &notifier)
            .send_sos(true)
            .await
            .unwrap();

        assert_eq!(report.location, LocationStatus::PermissionDenied);
        assert_eq!(sms.sent().len(), 2);
        assert_eq!(
            notifier.notices(),
            vec![Notice::LocationPermissionNeeded, Notice::SosSent { count: 2 }]
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let db = seeded();
        let sms = OutboxSender::failing_for(&["111"]);
        let loc = StaticLocation::no_fix();
        let notifier = RecordingNotifier::new();

        let report = SosDispatcher::new(&db, &sms, &loc, &notifier)
            .send_sos(true)
            .await
            .unwrap();

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.sent_count(), 1);
        assert_eq!(sms.sent()[0].phone, "222");
        assert_eq!(
            notifier.notices(),
            vec![
                Notice::SendFailed { name: "Mom".into() },
                Notice::SosSent { count: 1 }
            ]
        );
    }

    #[tokio::test]
    async fn every_failure_reports_failed_sos() {
        let db = seeded();
        let sms = OutboxSender::failing_for(&["111", "222"]);
        let loc = StaticLocation::no_fix();
        let notifier = RecordingNotifier::new();

        let report = SosDispatcher::new(&db, &sms, &loc, &notifier)
            .send_sos(false)
            .await
            .unwrap();

        assert_eq!(report.outcome, crate::sos::DispatchOutcome::AllFailed);
        assert_eq!(notifier.notices().last(), Some(&Notice::SosFailed));
    }
}
