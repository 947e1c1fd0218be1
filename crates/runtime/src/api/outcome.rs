//! Results of session commands.
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a session command ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The authoritative state was fetched and applied.
    Reconciled,
    /// A guard rejected the command before any remote call.
    Skipped(SkipReason),
    /// A remote call failed. The previous snapshot is kept and the error is
    /// recorded on the session view.
    Failed,
}

impl ActionOutcome {
    pub fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Why a guarded command was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// No snapshot has been loaded yet.
    NotLoaded,
    GameOver,
    QuestionsExhausted,
    GuessesExhausted,
    EmptyInput,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::NotLoaded => "session not loaded yet",
            SkipReason::GameOver => "game is over",
            SkipReason::QuestionsExhausted => "no questions left",
            SkipReason::GuessesExhausted => "no guesses left",
            SkipReason::EmptyInput => "nothing to send",
        };
        write!(f, "{}", label)
    }
}

/// Remote operation an event or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    FetchState,
    FetchEntities,
    AskQuestion,
    MakeGuess,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::FetchState => "fetch state",
            Operation::FetchEntities => "fetch entities",
            Operation::AskQuestion => "ask question",
            Operation::MakeGuess => "make guess",
        };
        write!(f, "{}", label)
    }
}
