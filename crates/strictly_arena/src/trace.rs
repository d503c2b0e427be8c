//! Match recordings.
//!
//! A trace holds the initial board and every applied action in order.
//! Since applying an action depends only on the board and the action,
//! replaying the log reproduces every intermediate board exactly.

use crate::orchestrator::{Disconnection, MatchOutcome};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use strictly_quoridor::{Action, Board, InvalidAction, rules};
use tracing::{debug, info, instrument};

/// One applied action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct TraceEntry {
    /// Step at which the action was played.
    pub step: u32,
    /// Acting player.
    pub player: usize,
    /// The action.
    pub action: Action,
    /// Seconds the player took to answer.
    pub elapsed_secs: f64,
}

/// Recording of a whole match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Trace {
    /// Time credit per player in seconds, `None` when unlimited.
    time_limits: Vec<Option<f64>>,
    /// Board before the first turn.
    initial_board: Board,
    /// Applied actions in order.
    actions: Vec<TraceEntry>,
    /// Winning player.
    winner: usize,
    /// Termination reason, empty on a clean finish.
    reason: String,
    /// Player names by seat.
    player_names: Vec<String>,
    /// Final ranking, best first.
    ranking: Vec<usize>,
    /// Disconnection per seat, `None` for players that stayed connected.
    disconnections: Vec<Option<Disconnection>>,
}

impl Trace {
    /// Starts an empty recording.
    pub fn new(initial_board: Board, time_limits: Vec<Option<f64>>, player_names: Vec<String>) -> Self {
        let seats = initial_board.player_count();
        Self {
            time_limits,
            initial_board,
            actions: Vec::new(),
            winner: 0,
            reason: String::new(),
            player_names,
            ranking: Vec::new(),
            disconnections: vec![None; seats],
        }
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        self.actions.push(entry);
    }

    pub(crate) fn finish(&mut self, outcome: &MatchOutcome) {
        self.winner = outcome.winner;
        self.reason = outcome.reason.clone();
        self.ranking = outcome.ranking.clone();
        self.disconnections = outcome.disconnections.clone();
    }

    /// Writes the trace as JSON.
    pub fn write(&self, writer: impl Write) -> Result<(), TraceError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a trace written by [`Trace::write`].
    pub fn load(reader: impl Read) -> Result<Self, TraceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the trace to a file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TraceError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write(&mut writer)?;
        writer.flush()?;
        info!(actions = self.actions.len(), "Trace saved");
        Ok(())
    }

    /// Reads a trace from a file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let trace = Self::load(BufReader::new(File::open(path.as_ref())?))?;
        debug!(actions = trace.actions.len(), "Trace loaded");
        Ok(trace)
    }

    /// Board after the last recorded action.
    pub fn replay(&self) -> Result<Board, TraceError> {
        let mut board = self.initial_board.clone();
        for (index, entry) in self.actions.iter().enumerate() {
            apply_entry(&mut board, index, entry)?;
        }
        Ok(board)
    }

    /// Every board of the match, the initial one included.
    pub fn replay_states(&self) -> Result<Vec<Board>, TraceError> {
        let mut states = Vec::with_capacity(self.actions.len() + 1);
        let mut board = self.initial_board.clone();
        states.push(board.clone());
        for (index, entry) in self.actions.iter().enumerate() {
            apply_entry(&mut board, index, entry)?;
            states.push(board.clone());
        }
        Ok(states)
    }
}

fn apply_entry(board: &mut Board, index: usize, entry: &TraceEntry) -> Result<(), TraceError> {
    rules::apply(board, entry.action, entry.player)
        .map_err(|source| TraceError::new(TraceErrorKind::Replay { index, source }))
}

/// What went wrong with a trace.
#[derive(Debug, Display, Error)]
pub enum TraceErrorKind {
    /// Reading or writing failed.
    #[display("I/O failure: {_0}")]
    Io(std::io::Error),

    /// The document is not a valid trace.
    #[display("invalid trace document: {_0}")]
    Json(serde_json::Error),

    /// A recorded action is illegal on the replayed board.
    #[display("recorded action #{index} cannot be replayed: {source}")]
    Replay {
        /// Position of the action in the log.
        index: usize,
        /// The rules rejection.
        source: InvalidAction,
    },
}

/// Trace error with location tracking.
#[derive(Debug, Display, Error)]
#[display("Trace error: {} at {}:{}", kind, file, line)]
pub struct TraceError {
    /// What went wrong.
    #[error(source)]
    pub kind: TraceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TraceError {
    /// Creates a new trace error with caller location tracking.
    #[track_caller]
    pub fn new(kind: TraceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for TraceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(TraceErrorKind::Io(err))
    }
}

impl From<serde_json::Error> for TraceError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(TraceErrorKind::Json(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_applies_actions_in_order() {
        let board = Board::new(2).unwrap();
        let mut trace = Trace::new(board, vec![None, None], vec!["a".into(), "b".into()]);
        trace.push(TraceEntry::new(1, 0, Action::move_to(1, 4), 0.1));
        trace.push(TraceEntry::new(2, 1, Action::horizontal_wall(0, 0), 0.2));

        let states = trace.replay_states().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[1].pawn(0), strictly_quoridor::Position::new(1, 4));
        assert_eq!(states[2].walls_remaining(), &[10, 9]);
        assert_eq!(trace.replay().unwrap(), states[2]);
    }

    #[test]
    fn test_illegal_entry_fails_replay() {
        let mut trace = Trace::new(Board::new(2).unwrap(), vec![None, None], vec![]);
        trace.push(TraceEntry::new(1, 0, Action::move_to(1, 4), 0.0));
        trace.push(TraceEntry::new(2, 0, Action::move_to(5, 5), 0.0));

        let err = trace.replay().unwrap_err();
        assert!(matches!(err.kind, TraceErrorKind::Replay { index: 1, .. }));
    }

    #[test]
    fn test_garbage_is_a_json_error() {
        let err = Trace::load("not json".as_bytes()).unwrap_err();
        assert!(matches!(err.kind, TraceErrorKind::Json(_)));
    }
}
