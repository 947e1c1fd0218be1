//! Widgets composing the terminal UI.
pub mod footer;
pub mod header;
pub mod history;
pub mod input;
pub mod map;
pub mod messages;

pub use map::MapViewport;
