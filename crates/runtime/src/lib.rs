//! Session runtime for the daily geography puzzle.
//!
//! This crate wires a remote [`GameAuthority`] into a per-mode session state
//! machine running on a dedicated worker task. Consumers embed [`Runtime`]
//! and talk to it through [`RuntimeHandle`]: async commands for actions, a
//! synchronous view accessor for render and map callbacks, and a topic-based
//! event bus for notifications.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`engine`] holds the session state machine and its published view
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`clock`] supplies "today" for the day-rollover check
//! - [`mock`] is an in-memory authority for tests and offline runs
//! - workers keep background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod engine;
pub mod events;
pub mod mock;
pub mod runtime;
pub mod selection;

mod workers;

pub use api::{
    ActionOutcome, AuthorityError, GameAuthority, Operation, Result, RuntimeError, RuntimeHandle,
    SkipReason,
};
pub use clock::{DayClock, FixedClock, UtcClock};
pub use engine::{SessionEngine, SessionPhase, SessionView};
pub use events::{CatalogEvent, Event, EventBus, SessionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use selection::SharedSelection;
