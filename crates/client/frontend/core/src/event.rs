//! Utilities for reacting to runtime events inside UI layers.
use chrono::Utc;
use game_core::{GuessVerdict, Verdict};
use runtime::{CatalogEvent, Event, SessionEvent, SkipReason};

use crate::message::{MessageEntry, MessageLevel, MessageLog};

#[derive(Clone, Copy, Debug, Default)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
    fn take_message_log(self) -> MessageLog
    where
        Self: Sized;
}

/// Turns session and catalog events into player-facing messages.
#[derive(Debug)]
pub struct SessionMessages {
    log: MessageLog,
}

impl SessionMessages {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: MessageLog::new(capacity),
        }
    }

    pub fn with_log(log: MessageLog) -> Self {
        Self { log }
    }
}

impl EventConsumer for SessionMessages {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        if let Some((text, level)) = describe(event) {
            self.log
                .push(MessageEntry::new(text, Some(Utc::now()), level));
        }
        // Every session event may have changed the published view.
        EventImpact::redraw()
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}

/// Message text for an event, if it deserves one.
pub fn describe(event: &Event) -> Option<(String, MessageLevel)> {
    match event {
        Event::Session(session) => describe_session(session),
        Event::Catalog(catalog) => describe_catalog(catalog),
    }
}

fn describe_session(event: &SessionEvent) -> Option<(String, MessageLevel)> {
    use MessageLevel::*;

    let described = match event {
        SessionEvent::StateRefreshed { .. } => return None,
        SessionEvent::DayRolledOver { current, .. } => {
            (format!("A new puzzle is out for {current}."), Info)
        }
        SessionEvent::GameOver {
            won: true, correct, ..
        } => match correct {
            Some(entity) => (format!("Solved! It was {}.", entity.name), Success),
            None => ("Solved!".to_string(), Success),
        },
        SessionEvent::GameOver { correct, .. } => match correct {
            Some(entity) => (format!("Game over. The answer was {}.", entity.name), Warning),
            None => ("Game over.".to_string(), Warning),
        },
        SessionEvent::QuestionAnswered { question, .. } => {
            let level = match question.verdict() {
                Verdict::Invalid => Warning,
                _ => Info,
            };
            (
                format!("{} → {}", question.original_text, question.verdict()),
                level,
            )
        }
        SessionEvent::GuessRecorded { guess, .. } => match guess.verdict() {
            GuessVerdict::Correct => (format!("{} is correct!", guess.text), Success),
            GuessVerdict::Incorrect => (format!("{} is not it.", guess.text), Info),
            GuessVerdict::Pending => (format!("Guessed {}.", guess.text), Info),
        },
        SessionEvent::ActionSkipped { reason, .. } => match reason {
            SkipReason::EmptyInput => return None,
            other => (format!("Not sent: {other}."), Warning),
        },
        SessionEvent::RequestFailed {
            operation, message, ..
        } => (format!("Could not {operation}: {message}"), Error),
    };
    Some(described)
}

fn describe_catalog(event: &CatalogEvent) -> Option<(String, MessageLevel)> {
    match event {
        CatalogEvent::Loaded { .. } => None,
        CatalogEvent::Failed { mode, .. } => Some((
            format!(
                "Could not load the {} list; suggestions are unavailable.",
                mode.entity_noun()
            ),
            MessageLevel::Warning,
        )),
    }
}
