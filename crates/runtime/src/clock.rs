//! Source of "today" for the defensive day-rollover check.
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use game_core::GameDate;

pub trait DayClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> GameDate {
        GameDate::from_instant(self.now())
    }
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl DayClock for UtcClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Clock pinned to midday of `date`.
    pub fn at_date(date: GameDate) -> Self {
        let noon = date
            .0
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now);
        Self::new(noon)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn set_date(&self, date: GameDate) {
        if let Some(noon) = date.0.and_hms_opt(12, 0, 0) {
            self.set(noon.and_utc());
        }
    }
}

impl DayClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
