//! HTTP authority for the daily geography puzzle.
//!
//! [`HttpAuthority`] implements [`runtime::GameAuthority`] for one game mode
//! against the REST API. Each mode lives under its own route prefix and
//! names its entity fields differently; [`ModeEndpoints`] carries those
//! differences so the rest of the crate stays mode-agnostic.
mod client;
mod endpoints;
mod error;
mod wire;

pub use client::{HttpAuthority, HttpAuthorityConfig};
pub use endpoints::ModeEndpoints;
pub use error::{HttpAuthorityError, classify_failure, extract_detail};
