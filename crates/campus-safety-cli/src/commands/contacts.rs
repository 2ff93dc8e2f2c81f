//! Emergency contact commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use campus_safety_core::{Config, Contact, ContactBook, Database, Event, Notice, Notifier};

use crate::adapters::ConsoleNotifier;

#[derive(Subcommand)]
pub enum ContactsAction {
    /// Add an emergency contact
    Add {
        /// Display name
        name: String,
        /// Phone number: digits, spaces and hyphens, optional leading +
        phone: String,
    },
    /// Delete the first contact matching both name and phone
    Delete {
        name: String,
        phone: String,
    },
    /// List contacts in insertion order
    List,
}

pub fn run(action: ContactsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let notifier = ConsoleNotifier::new(config.notifications.enabled);
    let db = Database::open()?;
    let mut book = ContactBook::load(&db, &notifier)?;

    match action {
        ContactsAction::Add { name, phone } => {
            // Rejected input surfaces as "error: <reason>" with exit code 1.
            let contact = book.add(&name, &phone)?;
            let event = Event::ContactAdded {
                name: contact.name().to_string(),
                phone: contact.phone().to_string(),
                at: Utc::now(),
            };
            notifier.notify(&Notice::ContactAdded);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        ContactsAction::Delete { name, phone } => {
            let removed = book.delete(&Contact::new(name, phone))?;
            notifier.notify(&Notice::ContactDeleted);
            let event = Event::ContactDeleted {
                name: removed.name().to_string(),
                phone: removed.phone().to_string(),
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        ContactsAction::List => {
            println!("{}", serde_json::to_string_pretty(book.contacts())?);
        }
    }
    Ok(())
}
