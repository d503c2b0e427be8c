//! Agent contract and its implementations.
//!
//! An agent is whatever picks actions for a seat: a scripted sequence, the
//! built-in path follower, a human behind an interactive surface, or a
//! process on the other side of an HTTP connection. The orchestrator only
//! ever talks to the [`Agent`] trait and turns every [`AgentError`] into a
//! disconnection.

mod human;
mod remote;
mod scripted;
pub mod server;
mod shortest_path;

pub use human::{HumanAgent, TurnRequest, spawn_console_surface};
pub use remote::{InitializeRequest, PlayRequest, PlayResponse, RemoteAgent};
pub use scripted::{ScriptedAgent, ScriptedTurn};
pub use server::{agent_router, serve_agent};
pub use shortest_path::ShortestPathAgent;

use derive_more::{Display, Error};
use std::time::Duration;
use strictly_quoridor::{Action, Board};

/// Why an agent could not deliver.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AgentError {
    /// The call exceeded its deadline.
    #[display("no answer before the deadline")]
    Timeout,

    /// The agent could not be reached.
    #[display("transport failure: {message}")]
    Transport {
        /// Details from the transport layer.
        message: String,
    },

    /// The agent answered with something that is not a valid reply.
    #[display("malformed reply: {message}")]
    Protocol {
        /// What was wrong with the reply.
        message: String,
    },

    /// The interactive surface was closed mid-turn.
    #[display("turn cancelled")]
    Cancelled,

    /// The agent failed for a reason of its own.
    #[display("agent failure: {message}")]
    Internal {
        /// Details from the agent.
        message: String,
    },
}

impl AgentError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Something that plays one or more seats of a match.
///
/// `time_left` is the credit the agent may spend on this call, `None` when
/// unlimited. The orchestrator enforces it; agents may use it to budget.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Called once before the first turn with the seats this agent plays.
    async fn initialize(
        &mut self,
        _board: &Board,
        _players: &[usize],
        _time_left: Option<Duration>,
    ) -> Result<(), AgentError> {
        Ok(())
    }

    /// Picks the action for `player` at `step`.
    async fn play(
        &mut self,
        board: &Board,
        player: usize,
        step: u32,
        time_left: Option<Duration>,
    ) -> Result<Action, AgentError>;

    /// Display name.
    fn name(&self) -> &str;
}
