//! Match configuration loaded from TOML.

use crate::agents::{Agent, HumanAgent, RemoteAgent, ShortestPathAgent, TurnRequest};
use crate::orchestrator::{DEFAULT_MAX_STEPS, MatchOrchestrator};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_quoridor::Board;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// How a seat is played.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AgentKind {
    /// Built-in path follower.
    ShortestPath,
    /// Agent served over HTTP at `url`.
    Remote,
    /// Human at the terminal.
    Human,
}

/// One `[[agents]]` entry.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Player name.
    name: String,

    /// How the seat is played.
    kind: AgentKind,

    /// Base URL, required for remote agents.
    #[serde(default)]
    url: Option<String>,

    /// Per-call time credit in seconds, unlimited when absent.
    #[serde(default)]
    time_credit_secs: Option<f64>,
}

impl AgentConfig {
    /// Creates an agent entry with unlimited credit.
    pub fn new(name: impl Into<String>, kind: AgentKind, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            url,
            time_credit_secs: None,
        }
    }

    /// Time credit as a duration.
    pub fn time_credit(&self) -> Result<Option<Duration>, ConfigError> {
        self.time_credit_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|e| {
                    ConfigError::new(format!("Invalid time credit for {}: {}", self.name, e))
                })
            })
            .transpose()
    }

    /// Builds the agent. Human agents also hand back their request channel.
    #[instrument(skip(self), fields(agent = %self.name, kind = %self.kind))]
    pub fn build(
        &self,
    ) -> Result<(Box<dyn Agent>, Option<mpsc::UnboundedReceiver<TurnRequest>>), ConfigError> {
        match self.kind {
            AgentKind::ShortestPath => Ok((Box::new(ShortestPathAgent::new(&self.name)), None)),
            AgentKind::Remote => {
                let url = self.url.as_ref().ok_or_else(|| {
                    ConfigError::new(format!("Remote agent {} has no url", self.name))
                })?;
                Ok((Box::new(RemoteAgent::new(&self.name, url)), None))
            }
            AgentKind::Human => {
                let (agent, requests) = HumanAgent::new(&self.name);
                Ok((Box::new(agent), Some(requests)))
            }
        }
    }
}

/// A whole match.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of players (2 or 4).
    player_count: usize,

    /// Walls per player, the even split of 20 when absent.
    #[serde(default)]
    starting_walls: Option<Vec<u8>>,

    /// Step ceiling.
    #[serde(default = "default_max_steps")]
    max_steps: u32,

    /// Where to write the trace, if anywhere.
    #[serde(default)]
    trace: Option<PathBuf>,

    /// One entry per seat, in seat order.
    agents: Vec<AgentConfig>,
}

fn default_max_steps() -> u32 {
    DEFAULT_MAX_STEPS
}

/// A built match and the request channels of its human seats.
pub type PreparedMatch = (MatchOrchestrator, Vec<mpsc::UnboundedReceiver<TurnRequest>>);

impl MatchConfig {
    /// Creates a configuration with default walls and step ceiling.
    pub fn new(player_count: usize, agents: Vec<AgentConfig>) -> Self {
        Self {
            player_count,
            starting_walls: None,
            max_steps: DEFAULT_MAX_STEPS,
            trace: None,
            agents,
        }
    }

    /// Parses a configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(players = config.player_count, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(agents = config.agents.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Builds the starting board.
    pub fn board(&self) -> Result<Board, ConfigError> {
        let board = match &self.starting_walls {
            Some(walls) => Board::with_starting_walls(self.player_count, walls.clone()),
            None => Board::new(self.player_count),
        };
        board.map_err(|e| ConfigError::new(format!("Invalid board: {}", e)))
    }

    /// Builds a ready-to-run orchestrator.
    #[instrument(skip(self), fields(players = self.player_count))]
    pub fn prepare(&self) -> Result<PreparedMatch, ConfigError> {
        let board = self.board()?;
        let mut agents = Vec::with_capacity(self.agents.len());
        let mut credits = Vec::with_capacity(self.agents.len());
        let mut surfaces = Vec::new();
        for entry in &self.agents {
            let (agent, requests) = entry.build()?;
            agents.push(agent);
            credits.push(entry.time_credit()?);
            surfaces.extend(requests);
        }
        let names = self.agents.iter().map(|entry| entry.name.clone()).collect();

        let orchestrator = MatchOrchestrator::new(board, agents)
            .and_then(|o| o.with_time_credits(credits))
            .and_then(|o| o.with_player_names(names))
            .map_err(|e| ConfigError::new(format!("Invalid match: {}", e)))?
            .with_max_steps(self.max_steps);
        Ok((orchestrator, surfaces))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
