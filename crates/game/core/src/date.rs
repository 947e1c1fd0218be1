//! Puzzle dates and the countdown to the next puzzle.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};

/// Calendar day a puzzle belongs to (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameDate(pub NaiveDate);

#[derive(Debug, thiserror::Error)]
#[error("invalid puzzle date {input:?}, expected YYYY-MM-DD")]
pub struct DateError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

impl GameDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Puzzle day containing `now`.
    pub fn from_instant(now: DateTime<Utc>) -> Self {
        Self(now.date_naive())
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn next(self) -> Self {
        Self(self.0.checked_add_days(Days::new(1)).unwrap_or(self.0))
    }
}

impl FromStr for GameDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|source| DateError {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Time left until the next puzzle unlocks at UTC midnight.
pub fn time_until_next_puzzle(now: DateTime<Utc>) -> TimeDelta {
    let tomorrow = GameDate::from_instant(now).next();
    match tomorrow.0.and_hms_opt(0, 0, 0) {
        Some(midnight) => midnight.and_utc() - now,
        None => TimeDelta::zero(),
    }
}

/// `HH:MM:SS`, clamped at zero.
pub fn format_countdown(remaining: TimeDelta) -> String {
    let total = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
