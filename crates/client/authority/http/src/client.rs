//! [`GameAuthority`] backed by the game's HTTP API.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

use game_core::{DailyState, Entity, EntityId, GameMode, Guess, Question};
use runtime::{AuthorityError, GameAuthority};

use crate::endpoints::ModeEndpoints;
use crate::error::{HttpAuthorityError, classify_failure, network};
use crate::wire;

/// Connection settings shared by every mode.
#[derive(Debug, Clone)]
pub struct HttpAuthorityConfig {
    pub base_url: String,
    /// Value of the `access_token` cookie issued at login.
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl HttpAuthorityConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One mode's view of the remote game server.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    mode: GameMode,
    endpoints: ModeEndpoints,
    base_url: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl HttpAuthority {
    pub fn new(mode: GameMode, config: HttpAuthorityConfig) -> Result<Self, HttpAuthorityError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(HttpAuthorityError::ClientBuild)?;
        Self::with_client(mode, config, http)
    }

    /// Share one connection pool across modes.
    pub fn with_client(
        mode: GameMode,
        config: HttpAuthorityConfig,
        http: reqwest::Client,
    ) -> Result<Self, HttpAuthorityError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| HttpAuthorityError::InvalidBaseUrl {
            url: config.base_url.clone(),
        })?;

        Ok(Self {
            mode,
            endpoints: ModeEndpoints::for_mode(mode),
            base_url,
            access_token: config.access_token,
            http,
        })
    }

    pub fn endpoints(&self) -> &ModeEndpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.endpoints.prefix, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.access_token {
            Some(token) => builder.header(COOKIE, format!("access_token={token}")),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<String, AuthorityError> {
        let response = builder.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;

        if status.is_success() {
            Ok(body)
        } else {
            let error = classify_failure(status.as_u16(), &body);
            tracing::debug!(mode = %self.mode, status = status.as_u16(), %error, "request rejected");
            Err(error)
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<String, AuthorityError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }
}

#[async_trait]
impl GameAuthority for HttpAuthority {
    fn mode(&self) -> GameMode {
        self.mode
    }

    async fn get_state(&self) -> Result<DailyState, AuthorityError> {
        let body = self
            .execute(self.request(Method::GET, ModeEndpoints::STATE_PATH))
            .await?;
        wire::parse_state(&self.endpoints, &body)
    }

    async fn get_entities(&self) -> Result<Vec<Entity>, AuthorityError> {
        let body = self
            .execute(self.request(Method::GET, self.endpoints.entities_path))
            .await?;
        wire::parse_entities(&body)
    }

    async fn ask_question(&self, text: &str) -> Result<Question, AuthorityError> {
        let body = self
            .post(ModeEndpoints::QUESTION_PATH, &wire::question_body(text))
            .await?;
        wire::parse_question(&body)
    }

    async fn make_guess(
        &self,
        text: &str,
        entity_id: Option<EntityId>,
    ) -> Result<Guess, AuthorityError> {
        let payload = wire::guess_body(&self.endpoints, text, entity_id);
        let body = self.post(ModeEndpoints::GUESS_PATH, &payload).await?;
        wire::parse_guess(&self.endpoints, &body)
    }
}
