//! Terminal stand-ins for the platform collaborators.

use campus_safety_core::sos::{SmsError, SmsSender};
use campus_safety_core::{Notice, Notifier};

/// Prints notices to stderr, one per line.
pub struct ConsoleNotifier {
    enabled: bool,
}

impl ConsoleNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        if self.enabled {
            eprintln!("{notice}");
        }
    }
}

/// "Sends" by echoing the text to stderr. There is no radio behind it.
pub struct ConsoleSms;

impl SmsSender for ConsoleSms {
    fn send_text(&self, phone: &str, body: &str) -> Result<(), SmsError> {
        if phone.trim().is_empty() {
            return Err(SmsError::InvalidNumber(phone.to_string()));
        }
        eprintln!("sms -> {phone}: {body}");
        Ok(())
    }
}
