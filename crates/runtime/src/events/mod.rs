//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The full session state is not carried here; it is
//! published through the session view watch channel.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CatalogEvent, SessionEvent};
