use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmsError {
    #[error("invalid destination number: {0}")]
    InvalidNumber(String),

    #[error("transmission failed: {0}")]
    Transmission(String),
}

/// The platform's short-message channel. One call sends one text to one number.
pub trait SmsSender {
    fn send_text(&self, phone: &str, body: &str) -> Result<(), SmsError>;
}

/// A sent message as seen by [`OutboxSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingSms {
    pub phone: String,
    pub body: String,
}

/// Records messages instead of transmitting them. Numbers listed in
/// `failing` are rejected with [`SmsError::Transmission`].
#[derive(Debug, Default)]
pub struct OutboxSender {
    sent: Mutex<Vec<OutgoingSms>>,
    failing: Vec<String>,
}

impl OutboxSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(numbers: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: numbers.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingSms> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SmsSender for OutboxSender {
    fn send_text(&self, phone: &str, body: &str) -> Result<(), SmsError> {
        if self.failing.iter().any(|n| n == phone) {
            return Err(SmsError::Transmission(format!("no service for {phone}")));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| SmsError::Transmission("outbox poisoned".to_string()))?;
        sent.push(OutgoingSms {
            phone: phone.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
