use game_core::{Entity, EntityId, GameDate, GameMode, Verdict};
use runtime::mock::{MockAuthority, MockFailure, ScriptedAnswer};
use runtime::{
    ActionOutcome, Event, FixedClock, GameAuthority, Runtime, RuntimeConfig, RuntimeHandle,
    SessionEvent, SessionPhase, SkipReason, Topic,
};

fn day(d: u32) -> GameDate {
    GameDate::ymd(2024, 6, d).unwrap()
}

fn countries() -> Vec<Entity> {
    vec![
        Entity::new(EntityId(7), "Chile").with_secondary_name("Republic of Chile"),
        Entity::new(EntityId(42), "France").with_secondary_name("French Republic"),
        Entity::new(EntityId(51), "Finland").with_secondary_name("Republic of Finland"),
    ]
}

async fn start(mock: &MockAuthority, clock: &FixedClock) -> (Runtime, RuntimeHandle) {
    let runtime = Runtime::builder()
        .config(RuntimeConfig::for_mode(mock.mode()))
        .authority(mock.clone())
        .clock(clock.clone())
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    (runtime, handle)
}

/// Last question, answered yes: the quota hits zero only through the
/// reconciled snapshot, and further asks never reach the authority.
#[tokio::test]
async fn last_question_answered_then_asks_become_noops() {
    let mock = MockAuthority::builder(GameMode::Country)
        .date(day(10))
        .entities(countries())
        .correct(EntityId(42))
        .quotas(1, 3)
        .build();
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;

    assert!(handle.activate().await.unwrap().is_reconciled());
    assert_eq!(handle.view().snapshot().unwrap().remaining_questions, 1);

    mock.script_answer(ScriptedAnswer::yes());
    let outcome = handle.ask_question("is it in Europe?").await.unwrap();
    assert_eq!(outcome, ActionOutcome::Reconciled);

    {
        let view = handle.view();
        assert_eq!(view.snapshot().unwrap().remaining_questions, 0);
        assert_eq!(view.questions().len(), 1);
        assert_eq!(view.questions()[0].verdict(), Verdict::Yes);
        assert!(!view.can_ask());
    }

    let questions_sent = mock.calls().questions;
    let outcome = handle.ask_question("is it in Asia?").await.unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Skipped(SkipReason::QuestionsExhausted)
    );
    assert_eq!(mock.calls().questions, questions_sent);
    assert_eq!(handle.view().questions().len(), 1);
}

/// A winning guess ends the game only after the refetch reports it.
#[tokio::test]
async fn winning_guess_reveals_correct_entity() {
    let mock = MockAuthority::builder(GameMode::Country)
        .date(day(10))
        .entities(countries())
        .correct(EntityId(42))
        .build();
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;
    let mut session_rx = handle.subscribe(Topic::Session);

    handle.activate().await.unwrap();
    assert!(handle.view().correct_entity().is_none());

    let outcome = handle.make_guess("France", Some(EntityId(42))).await.unwrap();
    assert!(outcome.is_reconciled());

    {
        let view = handle.view();
        assert_eq!(view.phase, SessionPhase::GameOver);
        assert!(view.is_game_over());
        assert!(view.has_won());
        assert_eq!(view.correct_entity().map(|e| e.name.as_str()), Some("France"));
    }

    let mut saw_game_over = false;
    while let Ok(event) = session_rx.try_recv() {
        if let Event::Session(SessionEvent::GameOver { won, correct, .. }) = event {
            assert!(won);
            assert_eq!(correct.map(|e| e.id), Some(EntityId(42)));
            saw_game_over = true;
        }
    }
    assert!(saw_game_over);

    let calls = mock.calls();
    assert_eq!(
        handle.ask_question("too late?").await.unwrap(),
        ActionOutcome::Skipped(SkipReason::GameOver)
    );
    assert_eq!(
        handle.make_guess("Chile", None).await.unwrap(),
        ActionOutcome::Skipped(SkipReason::GameOver)
    );
    assert_eq!(mock.calls().questions, calls.questions);
    assert_eq!(mock.calls().guesses, calls.guesses);
}

/// A server-side date change wipes history and selection before the new
/// snapshot is applied.
#[tokio::test]
async fn server_day_change_resets_history_and_selection() {
    let states = vec![
        Entity::new(EntityId(1), "Texas").with_secondary_name("TX"),
        Entity::new(EntityId(2), "Ohio").with_secondary_name("OH"),
    ];
    let mock = MockAuthority::builder(GameMode::UsStates)
        .date(day(10))
        .entities(states)
        .correct(EntityId(1))
        .build();
    // Local clock stays on the old day; only the server moves on.
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;

    handle.activate().await.unwrap();
    handle.ask_question("is it on the coast?").await.unwrap();
    handle.make_guess("Ohio", Some(EntityId(2))).await.unwrap();
    handle.selection().toggle("Ohio");
    handle.selection().toggle("Texas");
    assert_eq!(handle.view().questions().len(), 1);
    assert_eq!(handle.view().guesses().len(), 1);

    let mut session_rx = handle.subscribe(Topic::Session);
    mock.advance_day(day(11), EntityId(2));
    handle.fetch_state().await.unwrap();

    let view = handle.view();
    assert_eq!(view.date(), Some(day(11)));
    assert_eq!(view.day_generation, 1);
    assert!(view.questions().is_empty());
    assert!(view.guesses().is_empty());
    assert!(view.correct_entity().is_none());
    assert!(handle.selection().is_empty());
    drop(view);

    let first = session_rx.try_recv().unwrap();
    assert!(matches!(
        first,
        Event::Session(SessionEvent::DayRolledOver { previous, current, .. })
            if previous == day(10) && current == day(11)
    ));
}

/// Catalog failure degrades autocomplete only; guessing works once the
/// network is back.
#[tokio::test]
async fn catalog_failure_is_non_fatal() {
    let mock = MockAuthority::builder(GameMode::Country)
        .date(day(10))
        .entities(countries())
        .correct(EntityId(51))
        .build();
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;

    mock.fail_next_entities(MockFailure::Network);
    let outcome = handle.activate().await.unwrap();
    assert!(outcome.is_reconciled());

    {
        let view = handle.view();
        assert!(view.catalog.suggest("fin", 5).is_empty());
        assert!(view.error.is_none());
        assert_eq!(view.phase, SessionPhase::Active);
    }

    mock.fail_next_guess(MockFailure::Network);
    let outcome = handle.make_guess("Finland", None).await.unwrap();
    assert_eq!(outcome, ActionOutcome::Failed);
    assert!(handle.view().error.is_some());
    assert!(handle.view().guesses().is_empty());

    let outcome = handle.make_guess("Finland", None).await.unwrap();
    assert!(outcome.is_reconciled());
    let view = handle.view();
    assert!(view.error.is_none());
    assert!(view.has_won());
    assert_eq!(view.guesses().len(), 1);
}

/// "Already over" responses trigger a refetch and leave no error behind.
#[tokio::test]
async fn game_over_rejection_resynchronizes() {
    let mock = MockAuthority::builder(GameMode::Wojewodztwa)
        .date(day(10))
        .entities(vec![Entity::new(EntityId(3), "mazowieckie")])
        .quotas(5, 2)
        .build();
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;
    handle.activate().await.unwrap();
    let fetches = mock.calls().state;

    mock.fail_next_question(MockFailure::GameOver);
    let outcome = handle.ask_question("is it in the north?").await.unwrap();

    assert_eq!(outcome, ActionOutcome::Reconciled);
    assert_eq!(mock.calls().state, fetches + 1);
    assert!(handle.view().error.is_none());
}

/// Quotas only ever move down across a run of questions, and history always
/// matches what the authority holds.
#[tokio::test]
async fn quotas_never_increase_and_history_matches_server() {
    let mock = MockAuthority::builder(GameMode::Powiaty)
        .date(day(10))
        .entities(vec![Entity::new(EntityId(9), "krakowski")])
        .quotas(4, 3)
        .build();
    let clock = FixedClock::at_date(day(10));
    let (_runtime, handle) = start(&mock, &clock).await;
    handle.activate().await.unwrap();

    mock.script_answer(ScriptedAnswer::yes());
    mock.script_answer(ScriptedAnswer::invalid("That is not a yes/no question."));
    mock.script_answer(ScriptedAnswer::unknown());
    mock.script_answer(ScriptedAnswer::no());
    mock.script_answer(ScriptedAnswer::no());
    mock.script_answer(ScriptedAnswer::no());

    let mut previous = handle.view().snapshot().unwrap().remaining_questions;
    for round in 0..8 {
        let outcome = handle
            .ask_question(format!("question {round}?"))
            .await
            .unwrap();
        let view = handle.view();
        let remaining = view.snapshot().unwrap().remaining_questions;
        assert!(remaining <= previous);
        previous = remaining;

        if outcome.is_skipped() {
            assert_eq!(remaining, 0);
        }
    }

    let view = handle.view();
    // The invalid question did not consume a turn on this server.
    assert_eq!(view.questions().len(), 5);
    assert_eq!(view.snapshot().unwrap().questions_asked, 4);
    let verdicts: Vec<_> = view.questions().iter().map(|q| q.verdict()).collect();
    assert_eq!(
        verdicts,
        vec![Verdict::Yes, Verdict::Invalid, Verdict::Unknown, Verdict::No, Verdict::No]
    );
}

#[tokio::test]
async fn builder_rejects_mismatched_mode() {
    let mock = MockAuthority::builder(GameMode::Powiaty).build();
    let result = Runtime::builder()
        .config(RuntimeConfig::for_mode(GameMode::Country))
        .authority(mock)
        .build()
        .await;
    assert!(matches!(
        result,
        Err(runtime::RuntimeError::ModeMismatch { .. })
    ));
}

/// Abandoning a mode mid-session settles quietly.
#[tokio::test]
async fn dropped_runtime_settles_without_panicking() {
    let mock = MockAuthority::builder(GameMode::Country)
        .date(day(10))
        .entities(countries())
        .build();
    let clock = FixedClock::at_date(day(10));
    let (runtime, handle) = start(&mock, &clock).await;

    let pending = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.activate().await })
    };
    drop(handle);
    drop(runtime);

    let result = pending.await.expect("task should not panic");
    assert!(result.is_ok());
}

#[tokio::test]
async fn shutdown_joins_worker() {
    let mock = MockAuthority::builder(GameMode::Country).build();
    let clock = FixedClock::at_date(day(10));
    let (runtime, handle) = start(&mock, &clock).await;
    drop(handle);
    runtime.shutdown().await.expect("worker should stop cleanly");
}
