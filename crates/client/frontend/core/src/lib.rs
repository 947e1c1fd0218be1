//! Cross-frontend primitives for presenting the puzzle.
//!
//! Houses the frontend traits, message logging, event handling, view-model
//! types and the map sync layer that any terminal or graphical client can
//! reuse.
pub mod config;
pub mod event;
pub mod frontend;
pub mod map;
pub mod message;
pub mod view_model;

pub use config::{FrontendConfig, GuessConfig, MapConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact, SessionMessages};
pub use frontend::{Frontend, SessionProvider};
