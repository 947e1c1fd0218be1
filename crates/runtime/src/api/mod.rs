//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod authority;
pub mod errors;
pub mod handle;
pub mod outcome;

pub use authority::{AuthorityError, GameAuthority};
pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use outcome::{ActionOutcome, Operation, SkipReason};
