//! Read-only session state published after every engine transition.
use std::sync::Arc;

use game_core::{
    DailyState, Entity, EntityCatalog, GameDate, GameMode, Guess, Question, SessionSnapshot,
};

/// Lifecycle of a mode's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Nothing fetched yet, or history discarded by a day rollover.
    Uninitialized,
    /// A remote round-trip is in flight.
    Loading,
    Active,
    GameOver,
}

/// Complete, consistent picture of one mode's session.
///
/// The daily state is swapped as a unit, so readers never observe quotas
/// from one response next to history from another.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub mode: GameMode,
    pub phase: SessionPhase,
    pub daily: Option<DailyState>,
    pub catalog: Arc<EntityCatalog>,
    /// User-visible, dismissible error from the last failed request.
    pub error: Option<String>,
    /// Incremented each time local state is reset for a new day.
    pub day_generation: u64,
}

impl SessionView {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            phase: SessionPhase::Uninitialized,
            daily: None,
            catalog: Arc::new(EntityCatalog::default()),
            error: None,
            day_generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.daily.as_ref().map(|daily| &daily.snapshot)
    }

    pub fn date(&self) -> Option<GameDate> {
        self.daily.as_ref().map(|daily| daily.date)
    }

    pub fn is_game_over(&self) -> bool {
        self.snapshot().is_some_and(|snapshot| snapshot.is_game_over)
    }

    pub fn has_won(&self) -> bool {
        self.snapshot().is_some_and(|snapshot| snapshot.won)
    }

    /// The solution, once the game is over.
    pub fn correct_entity(&self) -> Option<&Entity> {
        self.daily.as_ref().and_then(DailyState::revealed_entity)
    }

    pub fn questions(&self) -> &[Question] {
        self.daily
            .as_ref()
            .map(|daily| daily.questions.as_slice())
            .unwrap_or_default()
    }

    pub fn guesses(&self) -> &[Guess] {
        self.daily
            .as_ref()
            .map(|daily| daily.guesses.as_slice())
            .unwrap_or_default()
    }

    /// Whether the question input should accept a submission right now.
    pub fn can_ask(&self) -> bool {
        !self.is_loading() && self.snapshot().is_some_and(SessionSnapshot::can_ask)
    }

    pub fn can_guess(&self) -> bool {
        !self.is_loading() && self.snapshot().is_some_and(SessionSnapshot::can_guess)
    }

    /// Phase the session rests in when nothing is in flight.
    pub(crate) fn settled_phase(&self) -> SessionPhase {
        match &self.daily {
            None => SessionPhase::Uninitialized,
            Some(daily) if daily.is_game_over() => SessionPhase::GameOver,
            Some(_) => SessionPhase::Active,
        }
    }
}
