//! Incident feed commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use campus_safety_core::{Config, Database, Event, IncidentFeed, Notice, Notifier, SystemClock};

use crate::adapters::ConsoleNotifier;

#[derive(Subcommand)]
pub enum FeedAction {
    /// Report a new incident
    Post {
        title: String,
        description: String,
    },
    /// List incidents, newest first
    List,
}

pub fn run(action: FeedAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let notifier = ConsoleNotifier::new(config.notifications.enabled);
    let db = Database::open()?;
    let clock = SystemClock;
    let mut feed = IncidentFeed::load(&db, &clock, &notifier)?;

    match action {
        FeedAction::Post { title, description } => {
            let post = feed.post(&title, &description, &notifier)?;
            notifier.notify(&Notice::IncidentPosted);
            let event = Event::IncidentPosted {
                title: post.title,
                timestamp: post.timestamp,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FeedAction::List => {
            println!("{}", serde_json::to_string_pretty(feed.posts())?);
        }
    }
    Ok(())
}
