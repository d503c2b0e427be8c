//! Pawn movement: wall blocking, jumps over opponents and diagonal hops.

use crate::board::Board;
use crate::position::Position;
use tracing::instrument;

/// Offsets tried for every pawn move, in order.
///
/// The four orthogonal steps, the four diagonals, then the four two-cell
/// jumps. Shortest-path ties are broken by this order.
const CANDIDATE_OFFSETS: [(i8, i8); 12] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
];

/// Whether a wall covers the edge between two orthogonally adjacent cells.
///
/// A wall spans two cells, so each edge is covered by up to two anchors.
/// Returns false for cells that are not orthogonal neighbours.
pub fn is_wall_between(board: &Board, from: Position, to: Position) -> bool {
    let horizontal = board.horizontal_walls();
    let vertical = board.vertical_walls();
    match (
        i16::from(to.row) - i16::from(from.row),
        i16::from(to.col) - i16::from(from.col),
    ) {
        (1, 0) => horizontal.contains(from) || horizontal.contains(from.offset(0, -1)),
        (-1, 0) => {
            horizontal.contains(from.offset(-1, -1)) || horizontal.contains(from.offset(-1, 0))
        }
        (0, 1) => vertical.contains(from) || vertical.contains(from.offset(-1, 0)),
        (0, -1) => vertical.contains(from.offset(-1, -1)) || vertical.contains(from.offset(0, -1)),
        _ => false,
    }
}

/// Single orthogonal step onto the grid with no wall in between.
fn is_step_open(board: &Board, from: Position, to: Position) -> bool {
    to.is_on_board() && from.manhattan(to) == 1 && !is_wall_between(board, from, to)
}

/// A jump over `opponent` or a diagonal hop around it.
///
/// Both half-steps (onto the opponent, then off it) must be open. A
/// diagonal hop is only allowed when the straight jump past the same
/// opponent is blocked by a wall or the board edge.
fn is_hop_legal(board: &Board, from: Position, to: Position, opponent: Position) -> bool {
    if from.manhattan(opponent) + opponent.manhattan(to) != 2 {
        return false;
    }
    if !is_step_open(board, opponent, to) || !is_step_open(board, from, opponent) {
        return false;
    }
    let is_diagonal = from.row != to.row && from.col != to.col;
    if is_diagonal {
        let beyond = opponent.offset(opponent.row - from.row, opponent.col - from.col);
        return !is_step_open(board, opponent, beyond);
    }
    true
}

/// Whether a pawn standing on `from` may move to `to`, given where the
/// other pawns stand.
pub fn is_pawn_move_ok(board: &Board, from: Position, to: Position, opponents: &[Position]) -> bool {
    if to == from || opponents.contains(&to) {
        return false;
    }
    is_step_open(board, from, to)
        || opponents
            .iter()
            .any(|&opponent| is_hop_legal(board, from, to, opponent))
}

/// Cells reachable in one move from `from`, in candidate order.
pub(crate) fn destinations<'a>(
    board: &'a Board,
    from: Position,
    opponents: &'a [Position],
) -> impl Iterator<Item = Position> + 'a {
    CANDIDATE_OFFSETS
        .iter()
        .map(move |&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(move |&to| is_pawn_move_ok(board, from, to, opponents))
}

/// Whether `player` may move its pawn to `to` right now.
pub fn can_move_here(board: &Board, player: usize, to: Position) -> bool {
    is_pawn_move_ok(board, board.pawn(player), to, &board.opponents(player))
}

/// All cells `player` may move its pawn to, in candidate order.
#[instrument(level = "trace", skip(board))]
pub fn legal_pawn_moves(board: &Board, player: usize) -> Vec<Position> {
    let opponents = board.opponents(player);
    destinations(board, board.pawn(player), &opponents).collect()
}
