//! Agent that replays a fixed script.

use super::shortest_path::step_towards_goal;
use super::{Agent, AgentError};
use std::collections::VecDeque;
use std::time::Duration;
use strictly_quoridor::{Action, Board};
use tracing::{debug, instrument};

/// One scripted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedTurn {
    /// Return this action.
    Play(Action),
    /// Fail with this error.
    Fail(AgentError),
    /// Wait, then return the action.
    Delay(Duration, Action),
}

/// Plays its script turn by turn, then follows its shortest path.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    name: String,
    turns: VecDeque<ScriptedTurn>,
    initialize_error: Option<AgentError>,
}

impl ScriptedAgent {
    /// Creates an agent playing `turns` in order.
    pub fn new(name: impl Into<String>, turns: impl IntoIterator<Item = ScriptedTurn>) -> Self {
        Self {
            name: name.into(),
            turns: turns.into_iter().collect(),
            initialize_error: None,
        }
    }

    /// Makes initialization fail with `error`.
    pub fn failing_initialize(mut self, error: AgentError) -> Self {
        self.initialize_error = Some(error);
        self
    }

    /// Turns left in the script.
    pub fn remaining(&self) -> usize {
        self.turns.len()
    }
}

#[async_trait::async_trait]
impl Agent for ScriptedAgent {
    async fn initialize(
        &mut self,
        _board: &Board,
        players: &[usize],
        _time_left: Option<Duration>,
    ) -> Result<(), AgentError> {
        debug!(agent = %self.name, ?players, "Initializing scripted agent");
        match self.initialize_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    #[instrument(skip(self, board, _step, _time_left), fields(agent = %self.name))]
    async fn play(
        &mut self,
        board: &Board,
        player: usize,
        _step: u32,
        _time_left: Option<Duration>,
    ) -> Result<Action, AgentError> {
        match self.turns.pop_front() {
            Some(ScriptedTurn::Play(action)) => Ok(action),
            Some(ScriptedTurn::Fail(error)) => Err(error),
            Some(ScriptedTurn::Delay(delay, action)) => {
                tokio::time::sleep(delay).await;
                Ok(action)
            }
            None => step_towards_goal(board, player),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let board = Board::new(2).unwrap();
        let mut agent = ScriptedAgent::new(
            "script",
            [
                ScriptedTurn::Play(Action::horizontal_wall(3, 3)),
                ScriptedTurn::Fail(AgentError::Cancelled),
            ],
        );

        assert_eq!(
            agent.play(&board, 0, 1, None).await,
            Ok(Action::horizontal_wall(3, 3))
        );
        assert_eq!(agent.play(&board, 0, 2, None).await, Err(AgentError::Cancelled));
        assert_eq!(agent.remaining(), 0);
        assert_eq!(agent.play(&board, 0, 3, None).await, Ok(Action::move_to(1, 4)));
    }

    #[tokio::test]
    async fn test_failing_initialize_fails_once() {
        let board = Board::new(2).unwrap();
        let mut agent = ScriptedAgent::new("script", []).failing_initialize(AgentError::Timeout);
        assert_eq!(
            agent.initialize(&board, &[0], None).await,
            Err(AgentError::Timeout)
        );
        assert_eq!(agent.initialize(&board, &[0], None).await, Ok(()));
    }
}
