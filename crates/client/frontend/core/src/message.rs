//! Shared message log primitives for frontends.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Severity level for UI messages produced from runtime events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(
        text: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        level: MessageLevel,
    ) -> Self {
        Self {
            text: text.into(),
            timestamp,
            level,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, None, MessageLevel::Info)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, None, MessageLevel::Warning)
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::info(message));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut log = MessageLog::new(2);
        log.push_text("one");
        log.push_text("two");
        log.push_text("three");

        let recent: Vec<_> = log.recent(5).map(|entry| entry.text.as_str()).collect();
        assert_eq!(recent, vec!["three", "two"]);
    }
}
