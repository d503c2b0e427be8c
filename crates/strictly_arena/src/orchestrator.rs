//! Match orchestration between agents.
//!
//! One board, one sequential loop, at most one outstanding agent call.
//! Every agent fault becomes a disconnection; a match always ends with a
//! winner, a ranking and a reason.

use crate::agents::{Agent, AgentError};
use crate::trace::{Trace, TraceEntry};
use crate::viewer::{HeadlessViewer, Viewer};
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use strictly_quoridor::{Board, rules};
use tracing::{debug, info, instrument, warn};

/// Step ceiling after which a match is stopped.
pub const DEFAULT_MAX_STEPS: u32 = 1000;

/// Slack granted on top of an agent's credit before it is timed out.
pub const TIMEOUT_GRACE: Duration = Duration::from_millis(500);

/// Reason recorded when every agent is disconnected.
pub const NO_ONE_CONNECTED: &str = "No one could connect.";

/// Reason recorded when a single agent remains connected.
pub const OPPONENTS_EXPELLED: &str = "Opponent's have been expelled.";

const INITIALIZATION_FAILED: &str = "disconnected during Initialisation";

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum MatchPhase {
    /// Built, not yet run.
    NotStarted,
    /// Agents are being initialized.
    Initializing,
    /// Turns are being played.
    Running,
    /// The outcome is known.
    Finished,
}

/// Why and when a player left the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Disconnection {
    /// Step of the faulty turn, `None` during initialization.
    pub step: Option<u32>,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Winning player.
    pub winner: usize,
    /// Every player, best first.
    pub ranking: Vec<usize>,
    /// Termination reason, empty on a clean finish.
    pub reason: String,
    /// Steps played.
    pub steps: u32,
    /// Disconnection per seat, `None` for players that stayed connected.
    pub disconnections: Vec<Option<Disconnection>>,
}

/// A match could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    /// A per-player list does not have one entry per seat.
    #[display("{actual} {what} given for {expected} players")]
    CountMismatch {
        /// What was counted.
        what: &'static str,
        /// Seats on the board.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
}

fn check_count(what: &'static str, expected: usize, actual: usize) -> Result<(), MatchError> {
    if expected == actual {
        Ok(())
    } else {
        Err(MatchError::CountMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Drives agents through a match, one turn at a time.
pub struct MatchOrchestrator {
    board: Board,
    agents: Vec<Box<dyn Agent>>,
    time_credits: Vec<Option<Duration>>,
    player_names: Vec<String>,
    max_steps: u32,
    viewer: Box<dyn Viewer>,
    phase: MatchPhase,
    step: u32,
    trace: Trace,
    disconnections: Vec<Option<Disconnection>>,
    disconnection_order: Vec<usize>,
    arrivals: Vec<usize>,
    outcome: Option<MatchOutcome>,
}

impl MatchOrchestrator {
    /// Creates an orchestrator with one agent per seat, in seat order.
    ///
    /// Credits start unlimited and players are named after their agents.
    pub fn new(board: Board, agents: Vec<Box<dyn Agent>>) -> Result<Self, MatchError> {
        let seats = board.player_count();
        check_count("agents", seats, agents.len())?;
        let player_names: Vec<String> = agents.iter().map(|agent| agent.name().to_string()).collect();
        let trace = Trace::new(board.clone(), vec![None; seats], player_names.clone());
        Ok(Self {
            board,
            agents,
            time_credits: vec![None; seats],
            player_names,
            max_steps: DEFAULT_MAX_STEPS,
            viewer: Box::new(HeadlessViewer),
            phase: MatchPhase::NotStarted,
            step: 0,
            trace,
            disconnections: vec![None; seats],
            disconnection_order: Vec::new(),
            arrivals: Vec::new(),
            outcome: None,
        })
    }

    /// Sets the per-call time credit of every seat, `None` for unlimited.
    pub fn with_time_credits(mut self, credits: Vec<Option<Duration>>) -> Result<Self, MatchError> {
        check_count("time credits", self.board.player_count(), credits.len())?;
        self.time_credits = credits;
        self.trace = self.fresh_trace();
        Ok(self)
    }

    /// Overrides the player names recorded in the trace.
    pub fn with_player_names(mut self, names: Vec<String>) -> Result<Self, MatchError> {
        check_count("player names", self.board.player_count(), names.len())?;
        self.player_names = names;
        self.trace = self.fresh_trace();
        Ok(self)
    }

    /// Overrides the step ceiling.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Installs a viewer.
    pub fn with_viewer(mut self, viewer: impl Viewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Board as it stands.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Steps played so far.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Recording of the match so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the orchestrator, keeping the recording.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Plays the match to its end.
    ///
    /// Never fails: agent faults disconnect the agent and the match goes
    /// on. Running a finished match again returns the same outcome.
    #[instrument(skip(self), fields(players = self.board.player_count()))]
    pub async fn run(&mut self) -> MatchOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        info!("Starting match");
        self.trace = self.fresh_trace();
        self.viewer.init(&self.board);

        self.enter(MatchPhase::Initializing);
        self.initialize_agents().await;

        self.enter(MatchPhase::Running);
        self.play_turns().await;

        let outcome = self.conclude();
        self.enter(MatchPhase::Finished);
        info!(
            winner = outcome.winner,
            ranking = ?outcome.ranking,
            reason = %outcome.reason,
            steps = outcome.steps,
            "Match finished"
        );
        self.trace.finish(&outcome);
        self.viewer.finished(self.step, outcome.winner, &outcome.reason);
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn fresh_trace(&self) -> Trace {
        let limits = self
            .time_credits
            .iter()
            .map(|credit| credit.map(|d| d.as_secs_f64()))
            .collect();
        Trace::new(self.board.clone(), limits, self.player_names.clone())
    }

    fn enter(&mut self, phase: MatchPhase) {
        debug!(from = %self.phase, to = %phase, "Match phase change");
        self.phase = phase;
    }

    async fn initialize_agents(&mut self) {
        for player in 0..self.agents.len() {
            debug!(player, "Initializing agent");
            let credit = self.time_credits[player];
            let seats = [player];
            let call = self.agents[player].initialize(&self.board, &seats, credit);
            if let Err(err) = call_with_deadline(deadline(credit), call).await {
                warn!(player, error = %err, "Agent failed to initialize");
                self.disconnect(player, None, INITIALIZATION_FAILED.to_string());
            }
        }
    }

    async fn play_turns(&mut self) {
        let seats = self.board.player_count();
        let mut player = 0;
        while !self.board.is_finished() && self.active_players() > 1 && self.step < self.max_steps {
            if self.is_connected(player) && !self.board.is_player_on_goal(player) {
                self.play_turn(player).await;
            }
            player = (player + 1) % seats;
        }
        if self.step >= self.max_steps {
            info!(max_steps = self.max_steps, "Step ceiling reached");
        }
    }

    async fn play_turn(&mut self, player: usize) {
        self.step += 1;
        let step = self.step;
        debug!(step, player, "Asking player to play");
        self.viewer.playing(step, player);

        // Credit is reset for every call.
        let credit = self.time_credits[player];
        let started = Instant::now();
        let call = self.agents[player].play(&self.board, player, step, credit);
        let result = call_with_deadline(deadline(credit), call).await;
        let elapsed = started.elapsed();

        let action = match result {
            Ok(action) => action,
            Err(err) => {
                self.disconnect(player, Some(step), fault_reason(&err));
                return;
            }
        };
        if let Err(invalid) = rules::apply(&mut self.board, action, player) {
            self.disconnect(player, Some(step), format!("Invalid action: {invalid}"));
            return;
        }

        debug!(
            step,
            player,
            %action,
            elapsed_ms = elapsed.as_millis() as u64,
            credit_left_ms = ?credit.map(|c| c.saturating_sub(elapsed).as_millis()),
            "Action applied"
        );
        self.viewer.update(step, action, player);
        self.trace
            .push(TraceEntry::new(step, player, action, elapsed.as_secs_f64()));
        if self.board.is_player_on_goal(player) {
            info!(step, player, "Player reached its goal");
            self.arrivals.push(player);
        }
    }

    fn is_connected(&self, player: usize) -> bool {
        self.disconnections[player].is_none()
    }

    fn active_players(&self) -> usize {
        (0..self.board.player_count())
            .filter(|&player| self.is_connected(player) && !self.board.is_player_on_goal(player))
            .count()
    }

    fn disconnect(&mut self, player: usize, step: Option<u32>, reason: String) {
        warn!(player, ?step, %reason, "Player disconnected");
        self.disconnections[player] = Some(Disconnection::new(step, reason));
        self.disconnection_order.push(player);
    }

    fn conclude(&self) -> MatchOutcome {
        let seats = self.board.player_count();
        let connected = (0..seats).filter(|&player| self.is_connected(player)).count();
        let reason = match connected {
            0 => NO_ONE_CONNECTED,
            1 => OPPONENTS_EXPELLED,
            _ => "",
        };

        let mut ranking = self.arrivals.clone();
        ranking.extend(
            rules::scores(&self.board)
                .into_iter()
                .map(|(player, _)| player)
                .filter(|&player| self.is_connected(player) && !self.arrivals.contains(&player)),
        );
        ranking.extend(self.disconnection_order.iter().copied());

        let winner = match self.arrivals.first() {
            Some(&first) => first,
            None if connected > 0 => ranking.first().copied().unwrap_or(seats - 1),
            // Nobody is left to win; fall back to the last seat.
            None => seats - 1,
        };

        MatchOutcome {
            winner,
            ranking,
            reason: reason.to_string(),
            steps: self.step,
            disconnections: self.disconnections.clone(),
        }
    }
}

fn deadline(credit: Option<Duration>) -> Option<Duration> {
    credit.map(|credit| credit + TIMEOUT_GRACE)
}

async fn call_with_deadline<T>(
    deadline: Option<Duration>,
    call: impl Future<Output = Result<T, AgentError>>,
) -> Result<T, AgentError> {
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout),
        },
        None => call.await,
    }
}

fn fault_reason(err: &AgentError) -> String {
    match err {
        AgentError::Timeout => format!("Timeout: {err}"),
        AgentError::Transport { .. } | AgentError::Protocol { .. } | AgentError::Cancelled => {
            format!("Invalid action: {err}")
        }
        AgentError::Internal { .. } => "Unknown error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ShortestPathAgent;

    #[test]
    fn test_agent_count_must_match() {
        let board = Board::new(2).unwrap();
        let agents: Vec<Box<dyn Agent>> = vec![Box::new(ShortestPathAgent::new("solo"))];
        assert_eq!(
            MatchOrchestrator::new(board, agents).err(),
            Some(MatchError::CountMismatch {
                what: "agents",
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_credit_count_must_match() {
        let board = Board::new(2).unwrap();
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(ShortestPathAgent::new("a")),
            Box::new(ShortestPathAgent::new("b")),
        ];
        let result = MatchOrchestrator::new(board, agents)
            .unwrap()
            .with_time_credits(vec![None]);
        assert!(matches!(result, Err(MatchError::CountMismatch { what: "time credits", .. })));
    }

    #[test]
    fn test_fault_reasons() {
        assert!(fault_reason(&AgentError::Timeout).starts_with("Timeout"));
        assert!(fault_reason(&AgentError::Cancelled).starts_with("Invalid action"));
        assert!(fault_reason(&AgentError::transport("refused")).starts_with("Invalid action"));
        assert_eq!(fault_reason(&AgentError::internal("boom")), "Unknown error");
    }

    #[tokio::test]
    async fn test_deadline_turns_slow_calls_into_timeouts() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, AgentError>(())
        };
        assert_eq!(
            call_with_deadline(Some(Duration::from_millis(10)), slow).await,
            Err(AgentError::Timeout)
        );
        assert_eq!(call_with_deadline(None, async { Ok::<_, AgentError>(3) }).await, Ok(3));
    }
}
