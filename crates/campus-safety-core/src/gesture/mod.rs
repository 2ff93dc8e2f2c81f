mod detector;
mod shortcut;

pub use detector::{DetectorState, GestureDetector, PressOutcome, PRESS_THRESHOLD, TIME_WINDOW_MS};
pub use shortcut::{Key, KeyAction, KeyDisposition, KeyEvent, SosShortcut};
