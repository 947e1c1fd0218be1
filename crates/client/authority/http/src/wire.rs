//! JSON payloads of the game API and their conversion into domain types.
use serde::Deserialize;
use serde_json::{Map, Value};

use game_core::{DailyState, Entity, EntityId, GameDate, Guess, Question, SessionSnapshot};
use runtime::AuthorityError;

use crate::endpoints::ModeEndpoints;

#[derive(Debug, Deserialize)]
struct WireState {
    date: String,
    state: WireSnapshot,
    #[serde(default)]
    questions: Vec<WireQuestion>,
    #[serde(default)]
    guesses: Vec<WireGuess>,
    /// `user` plus the mode-specific correct-entity field.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct WireSnapshot {
    remaining_questions: i64,
    remaining_guesses: i64,
    questions_asked: i64,
    guesses_made: i64,
    is_game_over: bool,
    won: bool,
    #[serde(default)]
    points: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    id: u64,
    original_question: String,
    #[serde(default)]
    question: Option<String>,
    valid: bool,
    #[serde(default)]
    answer: Option<bool>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGuess {
    id: u64,
    guess: String,
    #[serde(default)]
    answer: Option<bool>,
    /// Mode-specific entity id field.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    /// Polish datasets name entities `nazwa`.
    #[serde(default)]
    nazwa: Option<String>,
    #[serde(default)]
    official_name: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn decode<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T, AuthorityError> {
    serde_json::from_str(body).map_err(|error| AuthorityError::Decode(format!("{what}: {error}")))
}

impl From<WireSnapshot> for SessionSnapshot {
    fn from(wire: WireSnapshot) -> Self {
        Self {
            remaining_questions: count(wire.remaining_questions),
            remaining_guesses: count(wire.remaining_guesses),
            questions_asked: count(wire.questions_asked),
            guesses_made: count(wire.guesses_made),
            is_game_over: wire.is_game_over,
            won: wire.won,
            points: wire.points.map(count),
        }
    }
}

impl From<WireQuestion> for Question {
    fn from(wire: WireQuestion) -> Self {
        Self {
            id: wire.id,
            original_text: wire.original_question,
            normalized_text: wire.question,
            valid: wire.valid,
            answer: wire.answer,
            explanation: wire.explanation.filter(|text| !text.trim().is_empty()),
        }
    }
}

impl WireGuess {
    fn into_guess(self, endpoints: &ModeEndpoints) -> Guess {
        let entity_id = self
            .extra
            .get(endpoints.guess_id_field)
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
            .map(EntityId);
        Guess {
            id: self.id,
            text: self.guess,
            entity_id,
            answer: self.answer,
        }
    }
}

impl TryFrom<WireEntity> for Entity {
    type Error = AuthorityError;

    fn try_from(wire: WireEntity) -> Result<Self, Self::Error> {
        let name = wire.name.or(wire.nazwa).ok_or_else(|| {
            AuthorityError::Decode(format!("entity {} has no name", wire.id))
        })?;
        Ok(Entity {
            id: EntityId(wire.id),
            name,
            secondary_name: wire.official_name.or(wire.code),
        })
    }
}

pub fn parse_state(endpoints: &ModeEndpoints, body: &str) -> Result<DailyState, AuthorityError> {
    let wire: WireState = decode(body, "state")?;
    let date: GameDate = wire
        .date
        .parse()
        .map_err(|error| AuthorityError::Decode(format!("state: {error}")))?;

    let correct_entity = match wire.extra.get(endpoints.correct_field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let entity: WireEntity = serde_json::from_value(value.clone())
                .map_err(|error| AuthorityError::Decode(format!("correct entity: {error}")))?;
            Some(Entity::try_from(entity)?)
        }
    };

    Ok(DailyState {
        date,
        snapshot: wire.state.into(),
        questions: wire.questions.into_iter().map(Question::from).collect(),
        guesses: wire
            .guesses
            .into_iter()
            .map(|guess| guess.into_guess(endpoints))
            .collect(),
        correct_entity,
    })
}

pub fn parse_entities(body: &str) -> Result<Vec<Entity>, AuthorityError> {
    let wire: Vec<WireEntity> = decode(body, "entities")?;
    wire.into_iter().map(Entity::try_from).collect()
}

pub fn parse_question(body: &str) -> Result<Question, AuthorityError> {
    decode::<WireQuestion>(body, "question").map(Question::from)
}

pub fn parse_guess(endpoints: &ModeEndpoints, body: &str) -> Result<Guess, AuthorityError> {
    decode::<WireGuess>(body, "guess").map(|guess| guess.into_guess(endpoints))
}

pub fn question_body(text: &str) -> Value {
    serde_json::json!({ "question": text })
}

pub fn guess_body(endpoints: &ModeEndpoints, text: &str, entity_id: Option<EntityId>) -> Value {
    let mut body = Map::new();
    body.insert("guess".to_string(), Value::from(text));
    body.insert(
        endpoints.guess_id_field.to_string(),
        entity_id.map_or(Value::Null, |id| Value::from(id.0)),
    );
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameMode, Verdict};

    const COUNTRY_STATE: &str = r#"{
        "user": {"id": 3, "username": "ola", "email": "ola@example.com"},
        "date": "2024-06-10",
        "state": {
            "remaining_questions": 8, "remaining_guesses": 2,
            "questions_asked": 2, "guesses_made": 1,
            "is_game_over": false, "won": false
        },
        "questions": [
            {"id": 11, "original_question": "europe?", "question": "Is it in Europe?",
             "valid": true, "answer": true, "user_id": 3, "day_id": 9,
             "asked_at": "2024-06-10T08:00:00"},
            {"id": 12, "original_question": "hmm", "valid": false, "answer": null,
             "explanation": "Not a yes/no question.", "user_id": 3, "day_id": 9,
             "asked_at": "2024-06-10T08:01:00"}
        ],
        "guesses": [
            {"id": 4, "guess": "Spain", "country_id": 68, "answer": false,
             "guessed_at": "2024-06-10T08:02:00"}
        ],
        "country": null
    }"#;

    #[test]
    fn parses_country_state() {
        let endpoints = ModeEndpoints::for_mode(GameMode::Country);
        let state = parse_state(&endpoints, COUNTRY_STATE).unwrap();

        assert_eq!(state.date.to_string(), "2024-06-10");
        assert_eq!(state.snapshot.remaining_questions, 8);
        assert_eq!(state.snapshot.points, None);
        assert_eq!(state.questions.len(), 2);
        assert_eq!(state.questions[0].verdict(), Verdict::Yes);
        assert_eq!(state.questions[1].verdict(), Verdict::Invalid);
        assert_eq!(state.guesses[0].entity_id, Some(EntityId(68)));
        assert!(state.correct_entity.is_none());
    }

    #[test]
    fn parses_finished_powiat_state() {
        let body = r#"{
            "user": {"id": 1},
            "date": "2024-06-10",
            "state": {"id": 5, "user_id": 1, "day_id": 2,
                "remaining_questions": 0, "remaining_guesses": 1,
                "questions_asked": 15, "guesses_made": 2,
                "is_game_over": true, "won": true, "points": 120},
            "questions": [],
            "guesses": [{"id": 1, "guess": "powiat krakowski", "powiat_id": 9,
                         "answer": true, "guessed_at": "2024-06-10T10:00:00"}],
            "powiat": {"id": 9, "nazwa": "powiat krakowski"}
        }"#;
        let endpoints = ModeEndpoints::for_mode(GameMode::Powiaty);
        let state = parse_state(&endpoints, body).unwrap();

        assert!(state.snapshot.is_game_over);
        assert_eq!(state.snapshot.points, Some(120));
        let correct = state.revealed_entity().unwrap();
        assert_eq!(correct.id, EntityId(9));
        assert_eq!(correct.name, "powiat krakowski");
        assert_eq!(state.guesses[0].entity_id, Some(EntityId(9)));
    }

    #[test]
    fn entity_names_and_secondary_names() {
        let entities = parse_entities(
            r#"[{"id": 1, "name": "Texas", "code": "TX"},
                {"id": 2, "nazwa": "mazowieckie"},
                {"id": 3, "name": "France", "official_name": "French Republic"}]"#,
        )
        .unwrap();

        assert_eq!(entities[0].secondary_name.as_deref(), Some("TX"));
        assert_eq!(entities[1].name, "mazowieckie");
        assert_eq!(entities[2].secondary_name.as_deref(), Some("French Republic"));
        assert!(parse_entities(r#"[{"id": 4}]"#).is_err());
    }

    #[test]
    fn guess_body_uses_mode_field() {
        let endpoints = ModeEndpoints::for_mode(GameMode::UsStates);
        let body = guess_body(&endpoints, "Ohio", Some(EntityId(35)));
        assert_eq!(body["guess"], "Ohio");
        assert_eq!(body["us_state_id"], 35);

        let body = guess_body(&endpoints, "Ohio", None);
        assert!(body["us_state_id"].is_null());
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        let endpoints = ModeEndpoints::for_mode(GameMode::Country);
        assert!(matches!(
            parse_state(&endpoints, "<html>"),
            Err(AuthorityError::Decode(_))
        ));
    }
}
