//! Per-mode session state machine.
//!
//! [`SessionEngine`] owns the local view of one mode's remote session. It is
//! the only mutator of that view: every action is sent to the
//! [`GameAuthority`] and then reconciled by refetching the full state, so
//! quotas and the game-over flag are never inferred locally.
//!
//! ```text
//! Uninitialized ──fetch──▶ Loading ──ok──▶ Active ◀──┐
//!                              │               │       │ ask / guess
//!                              │               └──▶ Loading
//!                              └──over──▶ GameOver
//! ```
mod view;

pub use view::{SessionPhase, SessionView};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use game_core::{DailyState, EntityCatalog, EntityId, GameDate, SessionSnapshot};

use crate::api::{ActionOutcome, AuthorityError, GameAuthority, Operation, SkipReason};
use crate::clock::DayClock;
use crate::events::{CatalogEvent, Event, EventBus, SessionEvent};
use crate::selection::SharedSelection;

pub struct SessionEngine {
    authority: Arc<dyn GameAuthority>,
    clock: Arc<dyn DayClock>,
    selection: SharedSelection,
    event_bus: EventBus,
    view_tx: watch::Sender<SessionView>,
    view: SessionView,
    /// Last "today" the rollover check ran against.
    checked_day: Option<GameDate>,
}

impl SessionEngine {
    pub fn new(
        authority: Arc<dyn GameAuthority>,
        clock: Arc<dyn DayClock>,
        selection: SharedSelection,
        event_bus: EventBus,
    ) -> (Self, watch::Receiver<SessionView>) {
        let view = SessionView::new(authority.mode());
        let (view_tx, view_rx) = watch::channel(view.clone());

        let engine = Self {
            authority,
            clock,
            selection,
            event_bus,
            view_tx,
            view,
            checked_day: None,
        };
        (engine, view_rx)
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Fetch and atomically apply the authoritative state for today.
    ///
    /// On failure the previous snapshot is kept and the error is recorded on
    /// the view.
    pub async fn fetch_state(&mut self) -> ActionOutcome {
        self.enter_loading();
        self.refresh().await
    }

    /// Load the entity catalog. Failures keep the previous list.
    pub async fn fetch_entities(&mut self) -> ActionOutcome {
        let mode = self.view.mode;
        match self.authority.get_entities().await {
            Ok(entities) => {
                let catalog = EntityCatalog::new(entities);
                let count = catalog.len();
                self.view.catalog = Arc::new(catalog);
                self.publish();

                info!(%mode, count, "entity catalog loaded");
                self.event_bus
                    .publish(Event::Catalog(CatalogEvent::Loaded { mode, count }));
                ActionOutcome::Reconciled
            }
            Err(error) => {
                warn!(%mode, %error, "entity catalog fetch failed; keeping previous list");
                self.event_bus.publish(Event::Catalog(CatalogEvent::Failed {
                    mode,
                    message: error.to_string(),
                }));
                ActionOutcome::Failed
            }
        }
    }

    pub async fn ask_question(&mut self, text: &str) -> ActionOutcome {
        let text = text.trim();
        if let Some(reason) = self.guard(text, |snapshot| {
            (snapshot.remaining_questions == 0).then_some(SkipReason::QuestionsExhausted)
        }) {
            return self.skip(reason);
        }

        self.enter_loading();
        match self.authority.ask_question(text).await {
            Ok(question) => {
                debug!(id = question.id, verdict = %question.verdict(), "question answered");
                self.event_bus
                    .publish(Event::Session(SessionEvent::QuestionAnswered {
                        mode: self.view.mode,
                        question,
                    }));
            }
            Err(error) if error.is_reconciliation_signal() => {
                self.note_reconciliation(Operation::AskQuestion, &error);
            }
            Err(error) => return self.record_failure(Operation::AskQuestion, error),
        }

        self.refresh().await
    }

    pub async fn make_guess(&mut self, text: &str, entity_id: Option<EntityId>) -> ActionOutcome {
        let text = text.trim();
        if let Some(reason) = self.guard(text, |snapshot| {
            (snapshot.remaining_guesses == 0).then_some(SkipReason::GuessesExhausted)
        }) {
            return self.skip(reason);
        }

        self.enter_loading();
        match self.authority.make_guess(text, entity_id).await {
            Ok(guess) => {
                debug!(id = guess.id, verdict = %guess.verdict(), "guess recorded");
                self.event_bus
                    .publish(Event::Session(SessionEvent::GuessRecorded {
                        mode: self.view.mode,
                        guess,
                    }));
            }
            Err(error) if error.is_reconciliation_signal() => {
                self.note_reconciliation(Operation::MakeGuess, &error);
            }
            Err(error) => return self.record_failure(Operation::MakeGuess, error),
        }

        self.refresh().await
    }

    /// Discard history, selection and the correct entity for a new puzzle day.
    pub fn reset_for_new_day(&mut self) {
        let today = self.clock.today();
        self.reset_to(today);
    }

    pub fn dismiss_error(&mut self) {
        if self.view.error.take().is_some() {
            self.publish();
        }
    }

    fn guard<F>(&self, text: &str, quota: F) -> Option<SkipReason>
    where
        F: FnOnce(&SessionSnapshot) -> Option<SkipReason>,
    {
        let Some(snapshot) = self.view.snapshot() else {
            return Some(SkipReason::NotLoaded);
        };
        if snapshot.is_game_over {
            return Some(SkipReason::GameOver);
        }
        if let Some(reason) = quota(snapshot) {
            return Some(reason);
        }
        text.is_empty().then_some(SkipReason::EmptyInput)
    }

    /// Rollover check followed by a state fetch. Expects `Loading` phase.
    async fn refresh(&mut self) -> ActionOutcome {
        self.roll_over_if_stale();

        match self.authority.get_state().await {
            Ok(state) => {
                self.apply(state);
                ActionOutcome::Reconciled
            }
            Err(error) => self.record_failure(Operation::FetchState, error),
        }
    }

    fn roll_over_if_stale(&mut self) {
        let today = self.clock.today();
        if self.checked_day == Some(today) {
            return;
        }
        self.checked_day = Some(today);

        if let Some(cached) = self.view.date()
            && cached < today
        {
            self.reset_to(today);
        }
    }

    fn apply(&mut self, state: DailyState) {
        if let Some(cached) = self.view.date()
            && cached != state.date
        {
            self.reset_to(state.date);
        }

        let mode = self.view.mode;
        let was_over = self.view.is_game_over();
        let date = state.date;
        let snapshot = state.snapshot;
        let correct = state.revealed_entity().cloned();

        self.view.daily = Some(state);
        self.view.error = None;
        self.view.phase = self.view.settled_phase();
        self.publish();

        debug!(
            %mode,
            %date,
            remaining_questions = snapshot.remaining_questions,
            remaining_guesses = snapshot.remaining_guesses,
            "session state applied"
        );
        self.event_bus
            .publish(Event::Session(SessionEvent::StateRefreshed {
                mode,
                date,
                remaining_questions: snapshot.remaining_questions,
                remaining_guesses: snapshot.remaining_guesses,
            }));

        if snapshot.is_game_over && !was_over {
            info!(%mode, won = snapshot.won, "game over");
            self.event_bus.publish(Event::Session(SessionEvent::GameOver {
                mode,
                won: snapshot.won,
                correct,
            }));
        }
    }

    fn reset_to(&mut self, current: GameDate) {
        let previous = self.view.date();
        self.view.daily = None;
        self.view.error = None;
        self.view.day_generation += 1;
        if self.view.phase != SessionPhase::Loading {
            self.view.phase = self.view.settled_phase();
        }
        self.selection.clear();
        self.publish();

        let mode = self.view.mode;
        info!(%mode, ?previous, %current, "puzzle day changed; local state reset");
        if let Some(previous) = previous {
            self.event_bus
                .publish(Event::Session(SessionEvent::DayRolledOver {
                    mode,
                    previous,
                    current,
                }));
        }
    }

    fn enter_loading(&mut self) {
        self.view.phase = SessionPhase::Loading;
        self.publish();
    }

    fn skip(&mut self, reason: SkipReason) -> ActionOutcome {
        debug!(mode = %self.view.mode, %reason, "action skipped");
        self.event_bus
            .publish(Event::Session(SessionEvent::ActionSkipped {
                mode: self.view.mode,
                reason,
            }));
        ActionOutcome::Skipped(reason)
    }

    fn note_reconciliation(&mut self, operation: Operation, error: &AuthorityError) {
        debug!(%operation, %error, "authority reports game over; resynchronizing");
        self.view.error = None;
        self.publish();
    }

    fn record_failure(&mut self, operation: Operation, error: AuthorityError) -> ActionOutcome {
        let mode = self.view.mode;
        warn!(%mode, %operation, %error, "request failed");

        let message = error.to_string();
        self.view.error = Some(message.clone());
        self.view.phase = self.view.settled_phase();
        self.publish();

        self.event_bus
            .publish(Event::Session(SessionEvent::RequestFailed {
                mode,
                operation,
                message,
            }));
        ActionOutcome::Failed
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view.clone());
    }
}
