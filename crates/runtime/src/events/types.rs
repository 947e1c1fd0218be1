//! Event types for different topics.
use serde::{Deserialize, Serialize};

use game_core::{Entity, GameDate, GameMode, Guess, Question};

use crate::api::{Operation, SkipReason};

/// Session lifecycle notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh authoritative snapshot was applied.
    StateRefreshed {
        mode: GameMode,
        date: GameDate,
        remaining_questions: u32,
        remaining_guesses: u32,
    },

    /// Local history was discarded because the puzzle day changed.
    DayRolledOver {
        mode: GameMode,
        previous: GameDate,
        current: GameDate,
    },

    /// The authority reported the game as finished.
    GameOver {
        mode: GameMode,
        won: bool,
        correct: Option<Entity>,
    },

    QuestionAnswered { mode: GameMode, question: Question },

    GuessRecorded { mode: GameMode, guess: Guess },

    ActionSkipped { mode: GameMode, reason: SkipReason },

    RequestFailed {
        mode: GameMode,
        operation: Operation,
        message: String,
    },
}

/// Entity catalog notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatalogEvent {
    Loaded { mode: GameMode, count: usize },

    /// Fetch failed; the previous list stays in place.
    Failed { mode: GameMode, message: String },
}
