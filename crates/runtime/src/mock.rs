//! In-memory game authority for tests and offline development.
//!
//! Mirrors the remote rules closely enough to exercise the engine: quotas are
//! enforced server-side, exhausted or finished games answer with the
//! "game over" class of error, and a correct guess or the last wrong guess
//! ends the game.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use game_core::{
    DailyState, Entity, EntityId, GameDate, GameMode, Guess, Question, SessionSnapshot,
};

use crate::api::{AuthorityError, GameAuthority};

const GAME_OVER_DETAIL: &str = "User has no more questions left or game is over!";

/// Failure to inject into the next call of a given operation.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Network,
    GameOver,
    Unauthorized,
    Rejected(String),
    Server(u16),
}

impl MockFailure {
    fn into_error(self) -> AuthorityError {
        match self {
            MockFailure::Network => AuthorityError::Network("connection refused".to_string()),
            MockFailure::GameOver => AuthorityError::GameOver(GAME_OVER_DETAIL.to_string()),
            MockFailure::Unauthorized => AuthorityError::Unauthorized,
            MockFailure::Rejected(detail) => AuthorityError::Rejected {
                status: 422,
                detail,
            },
            MockFailure::Server(status) => AuthorityError::Server {
                status,
                detail: "internal server error".to_string(),
            },
        }
    }
}

/// Scripted ruling for the next question.
#[derive(Debug, Clone)]
pub struct ScriptedAnswer {
    pub valid: bool,
    pub answer: Option<bool>,
    pub explanation: Option<String>,
}

impl ScriptedAnswer {
    pub fn yes() -> Self {
        Self {
            valid: true,
            answer: Some(true),
            explanation: None,
        }
    }

    pub fn no() -> Self {
        Self {
            valid: true,
            answer: Some(false),
            explanation: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            valid: true,
            answer: None,
            explanation: None,
        }
    }

    pub fn invalid(explanation: impl Into<String>) -> Self {
        Self {
            valid: false,
            answer: None,
            explanation: Some(explanation.into()),
        }
    }
}

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub state: usize,
    pub entities: usize,
    pub questions: usize,
    pub guesses: usize,
}

#[derive(Debug)]
struct MockState {
    date: GameDate,
    entities: Vec<Entity>,
    correct: EntityId,
    max_questions: u32,
    max_guesses: u32,
    invalid_consumes_turn: bool,
    questions: Vec<Question>,
    guesses: Vec<Guess>,
    questions_used: u32,
    won: bool,
    next_id: u64,
    answers: VecDeque<ScriptedAnswer>,
    state_failures: VecDeque<MockFailure>,
    entity_failures: VecDeque<MockFailure>,
    question_failures: VecDeque<MockFailure>,
    guess_failures: VecDeque<MockFailure>,
    calls: CallCounts,
}

impl MockState {
    fn is_over(&self) -> bool {
        self.won || self.guesses.len() as u32 >= self.max_guesses
    }

    fn snapshot(&self) -> SessionSnapshot {
        let over = self.is_over();
        SessionSnapshot {
            remaining_questions: self.max_questions.saturating_sub(self.questions_used),
            remaining_guesses: self.max_guesses.saturating_sub(self.guesses.len() as u32),
            questions_asked: self.questions_used,
            guesses_made: self.guesses.len() as u32,
            is_game_over: over,
            won: self.won,
            points: over.then(|| if self.won { 100 } else { 0 }),
        }
    }

    fn correct_entity(&self) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == self.correct)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Scriptable in-memory [`GameAuthority`].
///
/// Clones share state, so a test can keep one clone for assertions while the
/// runtime owns another.
#[derive(Debug, Clone)]
pub struct MockAuthority {
    mode: GameMode,
    state: Arc<Mutex<MockState>>,
}

impl MockAuthority {
    pub fn builder(mode: GameMode) -> MockAuthorityBuilder {
        MockAuthorityBuilder::new(mode)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Queue the ruling for the next accepted question.
    pub fn script_answer(&self, answer: ScriptedAnswer) {
        self.lock().answers.push_back(answer);
    }

    pub fn fail_next_state(&self, failure: MockFailure) {
        self.lock().state_failures.push_back(failure);
    }

    pub fn fail_next_entities(&self, failure: MockFailure) {
        self.lock().entity_failures.push_back(failure);
    }

    pub fn fail_next_question(&self, failure: MockFailure) {
        self.lock().question_failures.push_back(failure);
    }

    pub fn fail_next_guess(&self, failure: MockFailure) {
        self.lock().guess_failures.push_back(failure);
    }

    /// Start a new puzzle day with a fresh history.
    pub fn advance_day(&self, date: GameDate, correct: EntityId) {
        let mut state = self.lock();
        state.date = date;
        state.correct = correct;
        state.questions.clear();
        state.guesses.clear();
        state.questions_used = 0;
        state.won = false;
    }
}

#[async_trait]
impl GameAuthority for MockAuthority {
    fn mode(&self) -> GameMode {
        self.mode
    }

    async fn get_state(&self) -> Result<DailyState, AuthorityError> {
        let mut state = self.lock();
        state.calls.state += 1;
        if let Some(failure) = state.state_failures.pop_front() {
            return Err(failure.into_error());
        }

        let snapshot = state.snapshot();
        let mut daily = DailyState::new(state.date, snapshot);
        daily.questions = state.questions.clone();
        daily.guesses = state.guesses.clone();
        if snapshot.is_game_over {
            daily.correct_entity = state.correct_entity().cloned();
        }
        Ok(daily)
    }

    async fn get_entities(&self) -> Result<Vec<Entity>, AuthorityError> {
        let mut state = self.lock();
        state.calls.entities += 1;
        if let Some(failure) = state.entity_failures.pop_front() {
            return Err(failure.into_error());
        }
        Ok(state.entities.clone())
    }

    async fn ask_question(&self, text: &str) -> Result<Question, AuthorityError> {
        let mut state = self.lock();
        state.calls.questions += 1;
        if let Some(failure) = state.question_failures.pop_front() {
            return Err(failure.into_error());
        }
        if state.is_over() || state.questions_used >= state.max_questions {
            return Err(MockFailure::GameOver.into_error());
        }

        let ruling = state.answers.pop_front().unwrap_or_else(ScriptedAnswer::no);
        if ruling.valid || state.invalid_consumes_turn {
            state.questions_used += 1;
        }

        let question = Question {
            id: state.next_id(),
            original_text: text.to_string(),
            normalized_text: ruling.valid.then(|| text.to_string()),
            valid: ruling.valid,
            answer: ruling.answer,
            explanation: ruling.explanation,
        };
        state.questions.push(question.clone());
        Ok(question)
    }

    async fn make_guess(
        &self,
        text: &str,
        entity_id: Option<EntityId>,
    ) -> Result<Guess, AuthorityError> {
        let mut state = self.lock();
        state.calls.guesses += 1;
        if let Some(failure) = state.guess_failures.pop_front() {
            return Err(failure.into_error());
        }
        if state.is_over() {
            return Err(AuthorityError::GameOver(
                "User has no more guesses left or game is over!".to_string(),
            ));
        }

        let correct = match entity_id {
            Some(id) => id == state.correct,
            None => state
                .correct_entity()
                .is_some_and(|entity| entity.is_named(text)),
        };
        if correct {
            state.won = true;
        }

        let guess = Guess {
            id: state.next_id(),
            text: text.to_string(),
            entity_id,
            answer: Some(correct),
        };
        state.guesses.push(guess.clone());
        Ok(guess)
    }
}

pub struct MockAuthorityBuilder {
    mode: GameMode,
    date: Option<GameDate>,
    entities: Vec<Entity>,
    correct: Option<EntityId>,
    max_questions: u32,
    max_guesses: u32,
    invalid_consumes_turn: bool,
}

impl MockAuthorityBuilder {
    fn new(mode: GameMode) -> Self {
        Self {
            mode,
            date: None,
            entities: Vec::new(),
            correct: None,
            max_questions: 10,
            max_guesses: 3,
            invalid_consumes_turn: false,
        }
    }

    pub fn date(mut self, date: GameDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn correct(mut self, id: EntityId) -> Self {
        self.correct = Some(id);
        self
    }

    pub fn quotas(mut self, questions: u32, guesses: u32) -> Self {
        self.max_questions = questions;
        self.max_guesses = guesses;
        self
    }

    /// Whether questions ruled invalid still use up a turn (default: no).
    pub fn invalid_consumes_turn(mut self, consumes: bool) -> Self {
        self.invalid_consumes_turn = consumes;
        self
    }

    pub fn build(self) -> MockAuthority {
        let date = self
            .date
            .unwrap_or_else(|| GameDate::from_instant(chrono::Utc::now()));
        let correct = self
            .correct
            .or_else(|| self.entities.first().map(|entity| entity.id))
            .unwrap_or(EntityId(0));

        MockAuthority {
            mode: self.mode,
            state: Arc::new(Mutex::new(MockState {
                date,
                entities: self.entities,
                correct,
                max_questions: self.max_questions,
                max_guesses: self.max_guesses,
                invalid_consumes_turn: self.invalid_consumes_turn,
                questions: Vec::new(),
                guesses: Vec::new(),
                questions_used: 0,
                won: false,
                next_id: 0,
                answers: VecDeque::new(),
                state_failures: VecDeque::new(),
                entity_failures: VecDeque::new(),
                question_failures: VecDeque::new(),
                guess_failures: VecDeque::new(),
                calls: CallCounts::default(),
            })),
        }
    }
}
