//! Terminal UI frontend for the daily geography puzzle.
//!
//! This crate provides a terminal-based user interface for the game.
//! It implements the `client_frontend_core::Frontend` trait.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Opens one runtime per mode through a `SessionProvider`
//! - Does NOT construct authorities or load configuration itself
//! - Reads the published session view, subscribes to events and submits
//!   actions via the runtime handle

mod app;
mod config;
mod event;
mod input;
pub mod logging;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::{CliConfig, UiConfig};

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
