//! Unified error types surfaced by the runtime API.
//!
//! Game-flow failures (network, rejected actions) are recorded on the session
//! view instead of being returned here. These errors cover the plumbing
//! between a [`crate::RuntimeHandle`] and its worker.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::GameMode;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a game authority before building")]
    MissingAuthority,

    #[error("authority serves {provided} but runtime is configured for {expected}")]
    ModeMismatch {
        expected: GameMode,
        provided: GameMode,
    },
}
