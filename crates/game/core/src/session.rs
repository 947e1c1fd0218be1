//! Authoritative session state for one puzzle day.
use crate::{
    date::GameDate,
    entity::Entity,
    history::{Guess, Question, newest_first},
};

/// Quotas and outcome for the current puzzle.
///
/// Always replaced wholesale from a remote response. Nothing in the client
/// increments or decrements these counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub remaining_questions: u32,
    pub remaining_guesses: u32,
    pub questions_asked: u32,
    pub guesses_made: u32,
    pub is_game_over: bool,
    pub won: bool,
    pub points: Option<u32>,
}

impl SessionSnapshot {
    pub fn can_ask(&self) -> bool {
        !self.is_game_over && self.remaining_questions > 0
    }

    pub fn can_guess(&self) -> bool {
        !self.is_game_over && self.remaining_guesses > 0
    }
}

/// Everything the authority reports for the current day, applied atomically.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyState {
    pub date: GameDate,
    pub snapshot: SessionSnapshot,
    pub questions: Vec<Question>,
    pub guesses: Vec<Guess>,
    /// Present only once the game is over.
    pub correct_entity: Option<Entity>,
}

impl DailyState {
    pub fn new(date: GameDate, snapshot: SessionSnapshot) -> Self {
        Self {
            date,
            snapshot,
            questions: Vec::new(),
            guesses: Vec::new(),
            correct_entity: None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.snapshot.is_game_over
    }

    /// Correct entity, hidden until the game is over.
    pub fn revealed_entity(&self) -> Option<&Entity> {
        if self.snapshot.is_game_over {
            self.correct_entity.as_ref()
        } else {
            None
        }
    }

    pub fn questions_newest_first(&self) -> Vec<&Question> {
        newest_first(&self.questions, |question| question.id)
    }

    pub fn guesses_newest_first(&self) -> Vec<&Guess> {
        newest_first(&self.guesses, |guess| guess.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;

    fn snapshot(questions: u32, guesses: u32, over: bool) -> SessionSnapshot {
        SessionSnapshot {
            remaining_questions: questions,
            remaining_guesses: guesses,
            is_game_over: over,
            ..Default::default()
        }
    }

    #[test]
    fn quotas_gate_actions() {
        assert!(snapshot(1, 1, false).can_ask());
        assert!(!snapshot(0, 1, false).can_ask());
        assert!(snapshot(0, 1, false).can_guess());
        assert!(!snapshot(5, 3, true).can_ask());
        assert!(!snapshot(5, 3, true).can_guess());
    }

    #[test]
    fn correct_entity_is_hidden_until_over() {
        let date = GameDate::ymd(2024, 5, 1).unwrap();
        let mut state = DailyState::new(date, snapshot(3, 3, false));
        state.correct_entity = Some(Entity::new(EntityId(7), "Chile"));
        assert!(state.revealed_entity().is_none());

        state.snapshot.is_game_over = true;
        assert_eq!(state.revealed_entity().map(|e| e.id), Some(EntityId(7)));
    }
}
