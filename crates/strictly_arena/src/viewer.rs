//! Viewers observe a match; they never influence it.

use crate::trace::Trace;
use std::time::Duration;
use strictly_quoridor::{Action, Board, rules};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Callbacks fired by the orchestrator as a match unfolds.
pub trait Viewer: Send {
    /// The match is about to start on `board`.
    fn init(&mut self, _board: &Board) {}

    /// `player` is being asked for its action at `step`.
    fn playing(&mut self, _step: u32, _player: usize) {}

    /// `player` played `action` at `step`.
    fn update(&mut self, _step: u32, _action: Action, _player: usize) {}

    /// The match ended after `step` steps.
    fn finished(&mut self, _step: u32, _winner: usize, _reason: &str) {}
}

/// Viewer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewer;

impl Viewer for HeadlessViewer {}

/// Viewer that prints the board to stdout after every action.
#[derive(Debug, Clone, Default)]
pub struct ConsoleViewer {
    board: Option<Board>,
}

impl ConsoleViewer {
    /// Creates a console viewer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Viewer for ConsoleViewer {
    fn init(&mut self, board: &Board) {
        println!("{board}");
        self.board = Some(board.clone());
    }

    fn update(&mut self, step: u32, action: Action, player: usize) {
        println!("Step {step}: player {player} plays {action}");
        let Some(board) = self.board.as_mut() else {
            return;
        };
        match rules::apply(board, action, player) {
            Ok(()) => println!("{board}"),
            Err(e) => warn!(error = %e, "Viewer could not follow the match"),
        }
    }

    fn finished(&mut self, step: u32, winner: usize, reason: &str) {
        println!("Match over after {step} steps, player {winner} wins");
        if !reason.is_empty() {
            println!("Reason: {reason}");
        }
    }
}

/// Messages sent from the orchestrator to a UI task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Match started.
    Init {
        /// Initial board.
        board: Board,
    },
    /// A player is thinking.
    Playing {
        /// Step number.
        step: u32,
        /// Acting player.
        player: usize,
    },
    /// An action was applied.
    Update {
        /// Step number.
        step: u32,
        /// Applied action.
        action: Action,
        /// Acting player.
        player: usize,
    },
    /// Match ended.
    Finished {
        /// Steps played.
        step: u32,
        /// Winning player.
        winner: usize,
        /// Termination reason, empty on a clean finish.
        reason: String,
    },
}

/// Viewer that forwards every callback as a [`MatchEvent`].
#[derive(Debug, Clone)]
pub struct ChannelViewer {
    event_tx: mpsc::UnboundedSender<MatchEvent>,
}

impl ChannelViewer {
    /// Creates a viewer and the receiving end of its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_tx }, event_rx)
    }

    fn send(&self, event: MatchEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

impl Viewer for ChannelViewer {
    fn init(&mut self, board: &Board) {
        self.send(MatchEvent::Init {
            board: board.clone(),
        });
    }

    fn playing(&mut self, step: u32, player: usize) {
        self.send(MatchEvent::Playing { step, player });
    }

    fn update(&mut self, step: u32, action: Action, player: usize) {
        self.send(MatchEvent::Update {
            step,
            action,
            player,
        });
    }

    fn finished(&mut self, step: u32, winner: usize, reason: &str) {
        self.send(MatchEvent::Finished {
            step,
            winner,
            reason: reason.to_string(),
        });
    }
}

/// How fast [`replay`] re-drives a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayPace {
    /// No waiting.
    #[default]
    Instant,
    /// The same delay before every action.
    Fixed(Duration),
    /// The time each player actually took.
    Recorded,
}

/// Feeds a recorded match to `viewer` as if it were live.
#[instrument(skip(viewer, trace), fields(actions = trace.actions().len()))]
pub async fn replay(viewer: &mut dyn Viewer, trace: &Trace, pace: ReplayPace) {
    viewer.init(trace.initial_board());
    for entry in trace.actions() {
        viewer.playing(entry.step, entry.player);
        let delay = match pace {
            ReplayPace::Instant => Duration::ZERO,
            ReplayPace::Fixed(delay) => delay,
            ReplayPace::Recorded => {
                Duration::try_from_secs_f64(entry.elapsed_secs).unwrap_or_default()
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        viewer.update(entry.step, entry.action, entry.player);
    }
    let steps = trace.actions().last().map_or(0, |entry| entry.step);
    viewer.finished(steps, *trace.winner(), trace.reason());
}
