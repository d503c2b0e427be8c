//! Agent reached over HTTP.
//!
//! The protocol is two JSON endpoints: `POST /initialize` with an
//! [`InitializeRequest`] and `POST /play` with a [`PlayRequest`], answered
//! by a [`PlayResponse`]. Times travel as seconds.

use super::{Agent, AgentError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strictly_quoridor::{Action, Board};
use tracing::{debug, instrument, warn};

/// Body of `POST /initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// Board before the first turn.
    pub board: Board,
    /// Seats the agent plays.
    pub players: Vec<usize>,
    /// Credit in seconds, `None` when unlimited.
    pub time_left: Option<f64>,
}

/// Body of `POST /play`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Board as it stands.
    pub board: Board,
    /// Seat to play.
    pub player: usize,
    /// Step number of this turn.
    pub step: u32,
    /// Credit in seconds, `None` when unlimited.
    pub time_left: Option<f64>,
}

/// Reply to `POST /play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResponse {
    /// The chosen action, as `[kind, row, col]`.
    pub action: Action,
}

/// Agent living behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteAgent {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl RemoteAgent {
    /// Creates a client for the agent served at `base_url`.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL of the remote agent.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
        time_left: Option<Duration>,
    ) -> Result<reqwest::Response, AgentError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?time_left, "Calling remote agent");
        let mut request = self.client.post(&url).json(body);
        if let Some(limit) = time_left {
            request = request.timeout(limit);
        }
        let response = request.send().await.map_err(classify)?;
        response.error_for_status().map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> AgentError {
    if err.is_timeout() {
        AgentError::Timeout
    } else if err.is_decode() {
        AgentError::protocol(err.to_string())
    } else {
        AgentError::transport(err.to_string())
    }
}

#[async_trait::async_trait]
impl Agent for RemoteAgent {
    #[instrument(skip(self, board), fields(agent = %self.name))]
    async fn initialize(
        &mut self,
        board: &Board,
        players: &[usize],
        time_left: Option<Duration>,
    ) -> Result<(), AgentError> {
        let body = InitializeRequest {
            board: board.clone(),
            players: players.to_vec(),
            time_left: time_left.map(|d| d.as_secs_f64()),
        };
        self.post("initialize", &body, time_left).await?;
        Ok(())
    }

    #[instrument(skip(self, board), fields(agent = %self.name))]
    async fn play(
        &mut self,
        board: &Board,
        player: usize,
        step: u32,
        time_left: Option<Duration>,
    ) -> Result<Action, AgentError> {
        let body = PlayRequest {
            board: board.clone(),
            player,
            step,
            time_left: time_left.map(|d| d.as_secs_f64()),
        };
        let response = self.post("play", &body, time_left).await?;
        let reply: PlayResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Remote agent sent an unusable reply");
            if e.is_timeout() {
                AgentError::Timeout
            } else {
                AgentError::protocol(e.to_string())
            }
        })?;
        Ok(reply.action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
