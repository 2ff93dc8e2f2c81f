use clap::Subcommand;
use campus_safety_core::clock::epoch_ms;
use campus_safety_core::gesture::{GestureDetector, Key, KeyDisposition, KeyEvent, SosShortcut};
use campus_safety_core::sos::StaticLocation;
use campus_safety_core::storage::DETECTOR_KEY;
use campus_safety_core::{Config, Database, Event, KvStore};
use serde::Serialize;

use super::sos::dispatch;
use crate::adapters::ConsoleNotifier;

#[derive(Subcommand)]
pub enum ShortcutAction {
    /// Register one volume-down press now (three within 2 s send the SOS)
    Press,
    /// Apply any due reset and print the detector state as JSON
    Status,
    /// Replay presses at the given millisecond offsets without touching saved state
    Simulate {
        /// Comma-separated press times in ms, e.g. 0,500,900
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<u64>,
        /// Actually send the SOS when the burst completes
        #[arg(long)]
        send: bool,
    },
}

#[derive(Serialize)]
struct PressReport {
    at_ms: u64,
    consumed: bool,
    events: Vec<Event>,
}

fn load_detector(db: &Database) -> GestureDetector {
    match db.kv_get(DETECTOR_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Stored detector state is unreadable ({e}); starting fresh");
            GestureDetector::new()
        }),
        Ok(None) => GestureDetector::new(),
        Err(e) => {
            tracing::warn!("Could not read detector state: {e}");
            GestureDetector::new()
        }
    }
}

fn save_detector(db: &Database, detector: &GestureDetector) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(detector)?;
    db.kv_set(DETECTOR_KEY, &json)?;
    Ok(())
}

/// Feed one press and send the SOS if it completes the burst.
fn press(
    shortcut: &mut SosShortcut,
    now_ms: u64,
    send: bool,
    db: &Database,
    config: &Config,
) -> Result<PressReport, Box<dyn std::error::Error>> {
    let notifier = ConsoleNotifier::new(config.notifications.enabled);
    let mut events = Vec::new();
    if let Some(reset) = shortcut.detector_mut().tick(now_ms) {
        events.push(reset);
    }

    let disposition = shortcut.on_key_event(&KeyEvent::down(Key::VolumeDown), now_ms, &notifier);
    match disposition {
        KeyDisposition::PassThrough { count } => {
            events.push(Event::PressCounted { count, at: chrono::Utc::now() });
        }
        KeyDisposition::TriggerSos => {
            events.push(Event::SosTriggered { at: chrono::Utc::now() });
            if send {
                tracing::info!("Shortcut triggered at {now_ms} ms; dispatching SOS");
                let report = dispatch(
                    db,
                    config,
                    &StaticLocation::no_fix(),
                    config.shortcut.include_location,
                )?;
                events.push(report.to_event());
            }
        }
        KeyDisposition::Ignored => {}
    }

    Ok(PressReport {
        at_ms: now_ms,
        consumed: disposition.consumed(),
        events,
    })
}

pub fn run(action: ShortcutAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;

    match action {
        ShortcutAction::Press => {
            if !config.shortcut.enabled {
                // Listener is off: drop any half-finished burst.
                let mut shortcut = SosShortcut::with_detector(load_detector(&db));
                shortcut.shutdown();
                save_detector(&db, shortcut.detector())?;
                eprintln!("shortcut is disabled (shortcut.enabled = false)");
                return Ok(());
            }
            let mut shortcut = SosShortcut::with_detector(load_detector(&db));
            let report = press(&mut shortcut, epoch_ms(), true, &db, &config)?;
            save_detector(&db, shortcut.detector())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ShortcutAction::Status => {
            let mut detector = load_detector(&db);
            if detector.tick(epoch_ms()).is_some() {
                tracing::debug!("Applied a due press-counter reset");
                save_detector(&db, &detector)?;
            }
            println!("{}", serde_json::to_string_pretty(&detector.snapshot())?);
        }
        ShortcutAction::Simulate { at, send } => {
            let mut shortcut = SosShortcut::new();
            let mut reports = Vec::with_capacity(at.len());
            for t in at {
                reports.push(press(&mut shortcut, t, send, &db, &config)?);
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}
