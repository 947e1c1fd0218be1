//! Event handling for CLI client.
//!
//! This module contains the event loop orchestrator and the per-mode
//! session it drives.

mod r#loop;
mod session;

pub use r#loop::EventLoop;
