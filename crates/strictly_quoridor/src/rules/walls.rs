//! Wall placement legality.

use super::path;
use crate::board::Board;
use crate::position::{ANCHOR_SIZE, Position};
use crate::wall::{Orientation, Wall};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Whether `wall` can be placed on the board as it stands.
///
/// The anchor must be on the intersection grid and free of walls of
/// either orientation, no same-orientation wall may sit on a colinear
/// neighbour, and every player must keep a path to its goal once the wall
/// is in. The path check runs on a scratch copy, so `board` is never
/// touched. Wall stock is not considered here.
#[instrument(level = "trace", skip(board))]
pub fn is_wall_possible_here(board: &Board, wall: Wall) -> bool {
    let anchor = wall.anchor;
    if !anchor.is_anchor() {
        return false;
    }
    if board.horizontal_walls().contains(anchor) || board.vertical_walls().contains(anchor) {
        return false;
    }
    let same = board.walls(wall.orientation);
    if wall
        .colinear_neighbors()
        .iter()
        .any(|neighbor| same.contains(*neighbor))
    {
        return false;
    }

    let mut probe = board.clone();
    probe.walls_mut(wall.orientation).insert(anchor);
    path::paths_exist(&probe)
}

/// Every wall `player` could place now, anchor by anchor in row-major
/// order, horizontal before vertical. Empty once the player is out of walls.
#[instrument(level = "trace", skip(board))]
pub fn legal_wall_moves(board: &Board, player: usize) -> Vec<Wall> {
    if board.walls_left(player) == 0 {
        return Vec::new();
    }
    (0..ANCHOR_SIZE)
        .flat_map(|row| (0..ANCHOR_SIZE).map(move |col| Position::new(row, col)))
        .flat_map(|anchor| Orientation::iter().map(move |orientation| Wall::new(anchor, orientation)))
        .filter(|wall| is_wall_possible_here(board, *wall))
        .collect()
}
