//! Agent that walks its shortest path and never places walls.

use super::{Agent, AgentError};
use std::time::Duration;
use strictly_quoridor::{Action, Board, rules};
use tracing::{debug, instrument};

/// Steps onto the next cell of its shortest path every turn.
#[derive(Debug, Clone)]
pub struct ShortestPathAgent {
    name: String,
}

impl ShortestPathAgent {
    /// Creates a new path follower.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The first move along `player`'s shortest path.
pub(crate) fn step_towards_goal(board: &Board, player: usize) -> Result<Action, AgentError> {
    let path = rules::shortest_path(board, player).map_err(|e| AgentError::internal(e.to_string()))?;
    path.first()
        .map(|cell| Action::Move(*cell))
        .ok_or_else(|| AgentError::internal(format!("player {player} is already on its goal")))
}

#[async_trait::async_trait]
impl Agent for ShortestPathAgent {
    #[instrument(skip(self, board, _step, _time_left), fields(agent = %self.name))]
    async fn play(
        &mut self,
        board: &Board,
        player: usize,
        _step: u32,
        _time_left: Option<Duration>,
    ) -> Result<Action, AgentError> {
        let action = step_towards_goal(board, player)?;
        debug!(%action, "Following shortest path");
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_moves_towards_goal() {
        let board = Board::new(2).unwrap();
        let mut agent = ShortestPathAgent::new("walker");
        let action = agent.play(&board, 1, 1, None).await.unwrap();
        assert_eq!(action, Action::move_to(7, 4));
        assert_eq!(agent.name(), "walker");
    }
}
