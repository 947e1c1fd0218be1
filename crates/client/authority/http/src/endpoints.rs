//! Per-mode routes and field names of the game API.
use game_core::GameMode;

/// Where a mode lives on the server and how its payloads name things.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeEndpoints {
    /// Route prefix, e.g. `/countrydle`.
    pub prefix: &'static str,
    /// Catalog route under the prefix.
    pub entities_path: &'static str,
    /// Field carrying the entity id on guesses.
    pub guess_id_field: &'static str,
    /// Field carrying the correct entity on the state response.
    pub correct_field: &'static str,
}

impl ModeEndpoints {
    pub const STATE_PATH: &'static str = "/state";
    pub const QUESTION_PATH: &'static str = "/question";
    pub const GUESS_PATH: &'static str = "/guess";

    pub const fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Country => Self {
                prefix: "/countrydle",
                entities_path: "/countries",
                guess_id_field: "country_id",
                correct_field: "country",
            },
            GameMode::UsStates => Self {
                prefix: "/us_statedle",
                entities_path: "/states",
                guess_id_field: "us_state_id",
                correct_field: "us_state",
            },
            GameMode::Powiaty => Self {
                prefix: "/powiatdle",
                entities_path: "/powiaty",
                guess_id_field: "powiat_id",
                correct_field: "powiat",
            },
            GameMode::Wojewodztwa => Self {
                prefix: "/wojewodztwodle",
                entities_path: "/wojewodztwa",
                guess_id_field: "wojewodztwo_id",
                correct_field: "wojewodztwo",
            },
        }
    }
}
