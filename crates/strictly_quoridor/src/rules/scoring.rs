//! Distance-based scores used to rank players when a match ends early.

use super::path;
use crate::board::Board;
use std::cmp::Reverse;

/// Score ceiling; a player on its goal scores this much.
pub const MAXIMUM_DISTANCE: u32 = 50;

/// `MAXIMUM_DISTANCE` minus the player's shortest path length, floored at 0.
pub fn score(board: &Board, player: usize) -> u32 {
    match path::min_steps_before_victory(board, player) {
        Ok(steps) => MAXIMUM_DISTANCE.saturating_sub(steps as u32),
        Err(_) => 0,
    }
}

/// `(player, score)` for every player, best first.
///
/// Sorted by score, then remaining walls, then player index, all
/// descending.
pub fn scores(board: &Board) -> Vec<(usize, u32)> {
    let mut scored: Vec<(usize, u32)> = (0..board.player_count())
        .map(|player| (player, score(board, player)))
        .collect();
    scored.sort_by_key(|&(player, score)| Reverse((score, board.walls_left(player), player)));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSnapshot;
    use crate::goal::Goal;
    use crate::position::Position;

    #[test]
    fn test_initial_scores_break_ties_by_index() {
        let board = Board::new(2).unwrap();
        assert_eq!(scores(&board), vec![(1, 42), (0, 42)]);
    }

    #[test]
    fn test_closer_player_ranks_first() {
        let board = Board::from_snapshot(BoardSnapshot {
            pawns: vec![Position::new(6, 4), Position::new(8, 0)],
            goals: vec![Goal::Row(8), Goal::Row(0)],
            walls_remaining: vec![10, 10],
            horizontal_walls: vec![],
            vertical_walls: vec![],
        })
        .unwrap();
        assert_eq!(score(&board, 0), 48);
        assert_eq!(scores(&board), vec![(0, 48), (1, 42)]);
    }

    #[test]
    fn test_walls_break_score_ties() {
        let board = Board::with_starting_walls(2, vec![9, 4]).unwrap();
        assert_eq!(scores(&board), vec![(0, 42), (1, 42)]);
    }
}
