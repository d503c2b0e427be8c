//! Strictly Arena - Quoridor matches between local, human and remote agents
//!
//! # Architecture
//!
//! - **Orchestrator**: one board, one sequential turn loop, per-call deadlines
//! - **Agents**: the [`Agent`] contract plus built-in, human and HTTP agents
//! - **Viewer**: passive callbacks for consoles, UIs and replays
//! - **Trace**: JSON recording of a match, replayable board by board
//! - **Config**: TOML description of a match
//!
//! # Example
//!
//! ```no_run
//! use strictly_arena::{Agent, MatchOrchestrator, ShortestPathAgent};
//! use strictly_quoridor::Board;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(ShortestPathAgent::new("north")),
//!     Box::new(ShortestPathAgent::new("south")),
//! ];
//! let mut orchestrator = MatchOrchestrator::new(Board::new(2)?, agents)?;
//! let outcome = orchestrator.run().await;
//! println!("player {} wins", outcome.winner);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod agents;
mod config;
mod orchestrator;
mod trace;
pub mod viewer;

// Crate-level exports - Agents
pub use agents::{
    Agent, AgentError, HumanAgent, RemoteAgent, ScriptedAgent, ScriptedTurn, ShortestPathAgent,
    TurnRequest,
};

// Crate-level exports - Configuration
pub use config::{AgentConfig, AgentKind, ConfigError, MatchConfig, PreparedMatch};

// Crate-level exports - Orchestration
pub use orchestrator::{
    DEFAULT_MAX_STEPS, Disconnection, MatchError, MatchOrchestrator, MatchOutcome, MatchPhase,
    NO_ONE_CONNECTED, OPPONENTS_EXPELLED, TIMEOUT_GRACE,
};

// Crate-level exports - Recording
pub use trace::{Trace, TraceEntry, TraceError, TraceErrorKind};

// Crate-level exports - Viewers
pub use viewer::{ChannelViewer, ConsoleViewer, HeadlessViewer, MatchEvent, ReplayPace, Viewer};
