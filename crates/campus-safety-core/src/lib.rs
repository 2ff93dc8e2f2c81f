//! # Campus Safety Core Library
//!
//! This library provides the core logic for the Campus Safety alert app.
//! Every operation is available through the standalone CLI binary; a mobile
//! front-end would be a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Gesture Detector**: a deadline-based state machine counting volume-down
//!   presses; the host drives its reset timer through `tick()`
//! - **SOS Dispatch**: one optional location request, then a best-effort text
//!   to every emergency contact
//! - **Contacts / Feed**: whole-list JSON documents in a key-value store
//! - **Storage**: SQLite key-value slots and TOML configuration
//!
//! ## Key Components
//!
//! - [`GestureDetector`]: repeated-press trigger
//! - [`SosDispatcher`]: location-augmented fan-out send
//! - [`ContactBook`] / [`IncidentFeed`]: the two persisted lists
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration

pub mod clock;
pub mod contacts;
pub mod error;
pub mod events;
pub mod feed;
pub mod gesture;
pub mod notice;
pub mod sos;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use contacts::{Contact, ContactBook};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use feed::{IncidentFeed, IncidentPost};
pub use gesture::{GestureDetector, KeyDisposition, KeyEvent, PressOutcome, SosShortcut};
pub use notice::{Notice, Notifier};
pub use sos::{DispatchReport, GeoPoint, LocationProvider, SmsSender, SosDispatcher};
pub use storage::{Config, Database, KvStore};
