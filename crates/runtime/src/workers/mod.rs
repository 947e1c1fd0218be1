//! Worker tasks that back the runtime orchestration.
//!
//! A single session worker owns the [`crate::engine::SessionEngine`] and
//! applies commands strictly in arrival order.

mod session;

pub use session::{Command, SessionWorker};
