//! Human player behind an interactive surface.
//!
//! The surface runs on its own thread or task. Each turn the agent sends a
//! [`TurnRequest`] and waits on its one-shot reply. Replying `None`, or
//! dropping the request, cancels the turn.

use super::{Agent, AgentError};
use std::io::BufRead;
use std::time::Duration;
use strictly_quoridor::{Action, Board};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// A turn waiting for a human decision.
#[derive(Debug)]
pub struct TurnRequest {
    /// Board as it stands.
    pub board: Board,
    /// Seat to play.
    pub player: usize,
    /// Step number of this turn.
    pub step: u32,
    /// Where to send the chosen action, or `None` to give up.
    pub reply: oneshot::Sender<Option<Action>>,
}

/// Agent that forwards each turn to an interactive surface.
#[derive(Debug)]
pub struct HumanAgent {
    name: String,
    requests: mpsc::UnboundedSender<TurnRequest>,
}

impl HumanAgent {
    /// Creates a human agent and the receiving end for its surface.
    pub fn new(name: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<TurnRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        let agent = Self {
            name: name.into(),
            requests,
        };
        (agent, rx)
    }
}

#[async_trait::async_trait]
impl Agent for HumanAgent {
    #[instrument(skip(self, board, _time_left), fields(agent = %self.name))]
    async fn play(
        &mut self,
        board: &Board,
        player: usize,
        step: u32,
        _time_left: Option<Duration>,
    ) -> Result<Action, AgentError> {
        let (reply, answer) = oneshot::channel();
        let request = TurnRequest {
            board: board.clone(),
            player,
            step,
            reply,
        };
        if self.requests.send(request).is_err() {
            warn!("Interactive surface is gone");
            return Err(AgentError::Cancelled);
        }

        debug!("Waiting for human decision");
        match answer.await {
            Ok(Some(action)) => Ok(action),
            Ok(None) | Err(_) => {
                info!("Human cancelled the turn");
                Err(AgentError::Cancelled)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Serves turn requests from the terminal on a dedicated thread.
///
/// Prints the board and reads `kind, row, col` lines from stdin until one
/// parses. An empty line, `quit` or end of input cancels the turn.
pub fn spawn_console_surface(
    mut requests: mpsc::UnboundedReceiver<TurnRequest>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        while let Some(request) = requests.blocking_recv() {
            println!("{}", request.board);
            println!(
                "Step {}: player {} to play (e.g. `move, 1, 4` or `wall-horizontal, 3, 3`)",
                request.step, request.player
            );
            let answer = loop {
                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) | Err(_) => break None,
                    Ok(_) => {}
                }
                let line = line.trim();
                if line.is_empty() || line == "quit" {
                    break None;
                }
                match line.parse::<Action>() {
                    Ok(action) => break Some(action),
                    Err(e) => println!("{e}"),
                }
            };
            // The match may have ended while waiting.
            let _ = request.reply.send(answer);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_is_returned() {
        let board = Board::new(2).unwrap();
        let (mut agent, mut rx) = HumanAgent::new("human");
        tokio::spawn(async move {
            let request = rx.recv().await.unwrap();
            assert_eq!(request.player, 1);
            assert_eq!(request.step, 4);
            request.reply.send(Some(Action::move_to(7, 4))).unwrap();
        });
        assert_eq!(
            agent.play(&board, 1, 4, None).await,
            Ok(Action::move_to(7, 4))
        );
    }

    #[tokio::test]
    async fn test_none_reply_cancels() {
        let board = Board::new(2).unwrap();
        let (mut agent, mut rx) = HumanAgent::new("human");
        tokio::spawn(async move {
            let request = rx.recv().await.unwrap();
            request.reply.send(None).unwrap();
        });
        assert_eq!(agent.play(&board, 0, 1, None).await, Err(AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_closed_surface_cancels() {
        let board = Board::new(2).unwrap();
        let (mut agent, rx) = HumanAgent::new("human");
        drop(rx);
        assert_eq!(agent.play(&board, 0, 1, None).await, Err(AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_dropped_reply_cancels() {
        let board = Board::new(2).unwrap();
        let (mut agent, mut rx) = HumanAgent::new("human");
        tokio::spawn(async move {
            drop(rx.recv().await);
        });
        assert_eq!(agent.play(&board, 0, 1, None).await, Err(AgentError::Cancelled));
    }
}
