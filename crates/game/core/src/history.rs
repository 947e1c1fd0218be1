//! Question and guess records created by the remote authority.
//!
//! The client never mutates these. They arrive as part of an authoritative
//! snapshot and are replaced wholesale on the next refresh.
use strum::Display;

use crate::entity::EntityId;

/// Opaque, increasing identifier used for history ordering.
pub type RecordId = u64;

/// A yes/no question and the authority's ruling on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub id: RecordId,
    pub original_text: String,
    /// Rephrased question the authority actually answered.
    pub normalized_text: Option<String>,
    /// `false` when the authority judged the question unanswerable.
    pub valid: bool,
    pub answer: Option<bool>,
    pub explanation: Option<String>,
}

impl Question {
    pub fn verdict(&self) -> Verdict {
        match (self.valid, self.answer) {
            (false, _) => Verdict::Invalid,
            (true, Some(true)) => Verdict::Yes,
            (true, Some(false)) => Verdict::No,
            (true, None) => Verdict::Unknown,
        }
    }
}

/// Display classification of a question result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    #[strum(to_string = "invalid")]
    Invalid,
    #[strum(to_string = "yes")]
    Yes,
    #[strum(to_string = "no")]
    No,
    /// Valid question without a definite answer.
    #[strum(to_string = "unknown")]
    Unknown,
}

/// A submitted guess and whether it was right.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guess {
    pub id: RecordId,
    pub text: String,
    pub entity_id: Option<EntityId>,
    pub answer: Option<bool>,
}

impl Guess {
    pub fn verdict(&self) -> GuessVerdict {
        match self.answer {
            Some(true) => GuessVerdict::Correct,
            Some(false) => GuessVerdict::Incorrect,
            None => GuessVerdict::Pending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessVerdict {
    #[strum(to_string = "correct")]
    Correct,
    #[strum(to_string = "incorrect")]
    Incorrect,
    #[strum(to_string = "pending")]
    Pending,
}

/// Records ordered newest first by identifier.
pub fn newest_first<T, F>(records: &[T], id: F) -> Vec<&T>
where
    F: Fn(&T) -> RecordId,
{
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|record| std::cmp::Reverse(id(record)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: RecordId, valid: bool, answer: Option<bool>) -> Question {
        Question {
            id,
            original_text: format!("q{id}"),
            normalized_text: None,
            valid,
            answer,
            explanation: None,
        }
    }

    #[test]
    fn invalid_wins_over_answer() {
        assert_eq!(question(1, false, Some(true)).verdict(), Verdict::Invalid);
        assert_eq!(question(1, false, None).verdict(), Verdict::Invalid);
    }

    #[test]
    fn null_answer_is_distinct_from_no() {
        assert_eq!(question(1, true, None).verdict(), Verdict::Unknown);
        assert_eq!(question(1, true, Some(false)).verdict(), Verdict::No);
        assert_eq!(question(1, true, Some(true)).verdict(), Verdict::Yes);
    }

    #[test]
    fn newest_first_orders_by_id_not_position() {
        let records = vec![question(4, true, None), question(9, true, None), question(2, true, None)];
        let ids: Vec<_> = newest_first(&records, |q| q.id)
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![9, 4, 2]);
    }
}
