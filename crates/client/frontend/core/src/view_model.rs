//! View-model snapshots derived from [`runtime::SessionView`].
use chrono::{DateTime, Utc};
use game_core::{
    EntityCatalog, EntityId, GameDate, GameMode, GuessVerdict, Verdict, format_countdown,
    newest_first, time_until_next_puzzle,
};
use runtime::{SessionPhase, SessionView};

use crate::map::PaintRole;
use crate::message::MessageLevel;

/// Framework-agnostic styling hooks implemented by each frontend's theme.
pub trait PresentationMapper {
    type Style;

    fn style_verdict(&self, verdict: Verdict) -> Self::Style;
    fn style_guess(&self, verdict: GuessVerdict) -> Self::Style;
    fn style_status(&self, status: SessionStatus) -> Self::Style;
    fn style_message(&self, level: MessageLevel) -> Self::Style;
    fn style_region(&self, role: PaintRole) -> Self::Style;
    fn emphasize(&self, base: Self::Style) -> Self::Style;
}

/// High-level snapshot of one mode's session used by presentation layers.
#[derive(Clone, Debug)]
pub struct ViewModel {
    pub header: HeaderView,
    /// Newest first.
    pub questions: Vec<QuestionRow>,
    /// Newest first.
    pub guesses: Vec<GuessRow>,
    /// Display name of the solution, once revealed.
    pub correct: Option<String>,
    pub error: Option<String>,
    pub can_ask: bool,
    pub can_guess: bool,
}

impl ViewModel {
    pub fn from_view(view: &SessionView, now: DateTime<Utc>) -> Self {
        let game_over = view.is_game_over();
        Self {
            header: HeaderView::from_view(view, now),
            questions: question_rows(view, game_over),
            guesses: guess_rows(view),
            correct: view.correct_entity().map(|entity| entity.name.clone()),
            error: view.error.clone(),
            can_ask: view.can_ask(),
            can_guess: view.can_guess(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    NotLoaded,
    Loading,
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn of(view: &SessionView) -> Self {
        match view.phase {
            SessionPhase::Loading => Self::Loading,
            SessionPhase::Uninitialized => Self::NotLoaded,
            SessionPhase::GameOver if view.has_won() => Self::Won,
            SessionPhase::GameOver => Self::Lost,
            SessionPhase::Active => Self::Playing,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotLoaded => "not loaded",
            Self::Loading => "loading…",
            Self::Playing => "playing",
            Self::Won => "solved",
            Self::Lost => "game over",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HeaderView {
    pub mode: GameMode,
    pub date: Option<GameDate>,
    pub status: SessionStatus,
    pub remaining_questions: Option<u32>,
    pub remaining_guesses: Option<u32>,
    pub points: Option<u32>,
    /// Time left until the next puzzle, `HH:MM:SS`.
    pub countdown: String,
}

impl HeaderView {
    fn from_view(view: &SessionView, now: DateTime<Utc>) -> Self {
        let snapshot = view.snapshot();
        Self {
            mode: view.mode,
            date: view.date(),
            status: SessionStatus::of(view),
            remaining_questions: snapshot.map(|s| s.remaining_questions),
            remaining_guesses: snapshot.map(|s| s.remaining_guesses),
            points: snapshot.and_then(|s| s.points),
            countdown: format_countdown(time_until_next_puzzle(now)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRow {
    /// 1-based position in asking order.
    pub number: usize,
    pub text: String,
    pub verdict: Verdict,
    /// Only disclosed once the game is over.
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRow {
    pub number: usize,
    pub text: String,
    pub verdict: GuessVerdict,
}

fn question_rows(view: &SessionView, game_over: bool) -> Vec<QuestionRow> {
    let questions = view.questions();
    let total = questions.len();
    newest_first(questions, |question| question.id)
        .into_iter()
        .enumerate()
        .map(|(position, question)| QuestionRow {
            number: total - position,
            text: question.original_text.clone(),
            verdict: question.verdict(),
            explanation: question.explanation.clone().filter(|_| game_over),
        })
        .collect()
}

fn guess_rows(view: &SessionView) -> Vec<GuessRow> {
    let guesses = view.guesses();
    let total = guesses.len();
    newest_first(guesses, |guess| guess.id)
        .into_iter()
        .enumerate()
        .map(|(position, guess)| GuessRow {
            number: total - position,
            text: guess.text.clone(),
            verdict: guess.verdict(),
        })
        .collect()
}

/// Autocomplete candidate for the guess input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub id: EntityId,
    pub name: String,
    pub secondary_name: Option<String>,
}

impl Suggestion {
    pub fn display(&self) -> String {
        match &self.secondary_name {
            Some(secondary) if secondary != &self.name => format!("{} ({secondary})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Catalog entries matching what the player has typed so far.
pub fn suggestions(catalog: &EntityCatalog, query: &str, limit: usize) -> Vec<Suggestion> {
    catalog
        .suggest(query, limit)
        .into_iter()
        .map(|entity| Suggestion {
            id: entity.id,
            name: entity.name.clone(),
            secondary_name: entity.secondary_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use game_core::{DailyState, Entity, Guess, Question, SessionSnapshot};

    fn question(id: u64, text: &str, answer: Option<bool>) -> Question {
        Question {
            id,
            original_text: text.into(),
            normalized_text: None,
            valid: true,
            answer,
            explanation: Some(format!("because {text}")),
        }
    }

    fn view(over: bool) -> SessionView {
        let snapshot = SessionSnapshot {
            remaining_questions: 7,
            remaining_guesses: 2,
            questions_asked: 3,
            guesses_made: 1,
            is_game_over: over,
            won: false,
            points: over.then_some(0),
        };
        let mut daily = DailyState::new(GameDate::ymd(2024, 6, 10).unwrap(), snapshot);
        // Server order is not trusted; ids decide.
        daily.questions = vec![
            question(30, "third", None),
            question(10, "first", Some(true)),
            question(20, "second", Some(false)),
        ];
        daily.guesses = vec![Guess {
            id: 5,
            text: "Chile".into(),
            entity_id: Some(EntityId(7)),
            answer: Some(false),
        }];
        daily.correct_entity = Some(Entity::new(EntityId(42), "France"));

        let mut view = SessionView::new(GameMode::Country);
        view.daily = Some(daily);
        view.phase = if over {
            SessionPhase::GameOver
        } else {
            SessionPhase::Active
        };
        view
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn history_is_newest_first_and_numbered() {
        let model = ViewModel::from_view(&view(false), noon());
        let rows: Vec<(usize, &str, Verdict)> = model
            .questions
            .iter()
            .map(|row| (row.number, row.text.as_str(), row.verdict))
            .collect();
        assert_eq!(
            rows,
            vec![
                (3, "third", Verdict::Unknown),
                (2, "second", Verdict::No),
                (1, "first", Verdict::Yes),
            ]
        );
        assert!(model.questions.iter().all(|row| row.explanation.is_none()));
        assert!(model.correct.is_none());
        assert_eq!(model.header.countdown, "12:00:00");
        assert_eq!(model.header.status, SessionStatus::Playing);
    }

    #[test]
    fn game_over_discloses_answer_and_explanations() {
        let model = ViewModel::from_view(&view(true), noon());
        assert_eq!(model.correct.as_deref(), Some("France"));
        assert_eq!(model.header.status, SessionStatus::Lost);
        assert_eq!(
            model.questions[0].explanation.as_deref(),
            Some("because third")
        );
        assert!(!model.can_ask);
        assert_eq!(model.guesses[0].verdict, GuessVerdict::Incorrect);
    }

    #[test]
    fn suggestions_follow_catalog_order() {
        let catalog = EntityCatalog::new(vec![
            Entity::new(EntityId(1), "Niger"),
            Entity::new(EntityId(2), "Nigeria").with_secondary_name("Federal Republic of Nigeria"),
            Entity::new(EntityId(3), "Algeria"),
        ]);
        let names: Vec<String> = suggestions(&catalog, "NIGER", 5)
            .iter()
            .map(Suggestion::display)
            .collect();
        assert_eq!(
            names,
            vec!["Niger", "Nigeria (Federal Republic of Nigeria)"]
        );
        assert_eq!(suggestions(&catalog, "eria", 1).len(), 1);
        assert!(suggestions(&catalog, "  ", 5).is_empty());
    }
}
