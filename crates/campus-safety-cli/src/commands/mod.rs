pub mod config;
pub mod contacts;
pub mod feed;
pub mod shortcut;
pub mod sos;
