//! Puzzle model shared across the runtime and the frontends.
//!
//! `game-core` defines the data a daily geography puzzle is made of: the game
//! modes, the guessable entities, question and guess records, the
//! authoritative session snapshot, and the client-local selection set. Every
//! API here is pure; fetching and reconciliation live in the `runtime` crate.
pub mod date;
pub mod entity;
pub mod history;
pub mod mode;
pub mod selection;
pub mod session;

pub use date::{DateError, GameDate, format_countdown, time_until_next_puzzle};
pub use entity::{Entity, EntityCatalog, EntityId};
pub use history::{Guess, GuessVerdict, Question, RecordId, Verdict, newest_first};
pub use mode::GameMode;
pub use selection::{SelectionSet, normalize_region_name};
pub use session::{DailyState, SessionSnapshot};
