//! Breadth-first shortest paths to a player's goal.

use super::movement;
use crate::board::Board;
use crate::error::NoPath;
use crate::position::{BOARD_SIZE, Position};
use std::collections::VecDeque;
use tracing::instrument;

const N: usize = BOARD_SIZE as usize;

/// Per-cell storage for the search, indexed by `(row, col)`.
struct CellGrid<T>([[T; N]; N]);

impl<T: Copy> CellGrid<T> {
    fn filled(value: T) -> Self {
        Self([[value; N]; N])
    }

    fn get(&self, cell: Position) -> Option<T> {
        cell.cell_index().map(|(row, col)| self.0[row][col])
    }

    fn set(&mut self, cell: Position, value: T) {
        if let Some((row, col)) = cell.cell_index() {
            self.0[row][col] = value;
        }
    }
}

/// A shortest sequence of cells leading `player` to its goal.
///
/// The starting cell is not included and the last cell satisfies the goal,
/// so the length is the number of moves needed. Moves include jumps and
/// diagonal hops given the current pawn positions. Among equally short
/// paths, the first one discovered in candidate order wins.
///
/// # Errors
///
/// Returns [`NoPath`] when walls cut the player off from every goal cell.
#[instrument(level = "trace", skip(board))]
pub fn shortest_path(board: &Board, player: usize) -> Result<Vec<Position>, NoPath> {
    let start = board.pawn(player);
    let goal = board.goal(player);
    if goal.is_reached_by(start) {
        return Ok(Vec::new());
    }

    let opponents = board.opponents(player);
    let mut parent: CellGrid<Option<Position>> = CellGrid::filled(None);
    let mut discovered = CellGrid::filled(false);
    let mut frontier = VecDeque::from([start]);
    discovered.set(start, true);

    while let Some(cell) = frontier.pop_front() {
        if goal.is_reached_by(cell) {
            return Ok(reconstruct(&parent, start, cell));
        }
        for next in movement::destinations(board, cell, &opponents) {
            if discovered.get(next) == Some(false) {
                discovered.set(next, true);
                parent.set(next, Some(cell));
                frontier.push_back(next);
            }
        }
    }

    Err(NoPath { player })
}

fn reconstruct(parent: &CellGrid<Option<Position>>, start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = parent.get(end).flatten();
    while let Some(cell) = current {
        if cell == start {
            break;
        }
        path.push(cell);
        current = parent.get(cell).flatten();
    }
    path.reverse();
    path
}

/// Number of moves `player` needs to reach its goal.
pub fn min_steps_before_victory(board: &Board, player: usize) -> Result<usize, NoPath> {
    shortest_path(board, player).map(|path| path.len())
}

/// Whether every player still has a path to its goal.
pub fn paths_exist(board: &Board) -> bool {
    (0..board.player_count()).all(|player| shortest_path(board, player).is_ok())
}
