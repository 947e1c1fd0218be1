//! Capability interface to the remote game authority.
//!
//! The authority owns every rule that matters: daily selection, answer
//! scoring, quota accounting and persistence. The runtime only ever asks it
//! for the current state and forwards player actions.
use async_trait::async_trait;
use thiserror::Error;

use game_core::{DailyState, Entity, EntityId, GameMode, Guess, Question};

/// Failures reported by a [`GameAuthority`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("network error: {0}")]
    Network(String),

    /// The day is already finished or the relevant quota is spent.
    #[error("game is over: {0}")]
    GameOver(String),

    #[error("not signed in")]
    Unauthorized,

    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AuthorityError {
    /// True for the "already over / quota exhausted" class.
    ///
    /// These are recovered by refetching state, never shown to the player.
    pub fn is_reconciliation_signal(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    pub fn is_user_visible(&self) -> bool {
        !self.is_reconciliation_signal()
    }
}

/// Remote game authority for a single mode.
///
/// Implementations must be cheap to share; the runtime holds one behind an
/// `Arc` for the lifetime of a mode mount.
#[async_trait]
pub trait GameAuthority: Send + Sync {
    fn mode(&self) -> GameMode;

    /// Snapshot, full history and (once over) the correct entity for today.
    async fn get_state(&self) -> Result<DailyState, AuthorityError>;

    async fn get_entities(&self) -> Result<Vec<Entity>, AuthorityError>;

    /// Returns the created question. Quota fields are never read from it.
    async fn ask_question(&self, text: &str) -> Result<Question, AuthorityError>;

    async fn make_guess(
        &self,
        text: &str,
        entity_id: Option<EntityId>,
    ) -> Result<Guess, AuthorityError>;
}
