//! The rules engine.
//!
//! Pure functions over a [`Board`]. Nothing here mutates a board except
//! [`apply`], and only after the action has been validated.

pub mod movement;
pub mod path;
pub mod scoring;
pub mod walls;

pub use movement::{can_move_here, is_wall_between, legal_pawn_moves};
pub use path::{min_steps_before_victory, paths_exist, shortest_path};
pub use scoring::{MAXIMUM_DISTANCE, score, scores};
pub use walls::{is_wall_possible_here, legal_wall_moves};

use crate::action::Action;
use crate::board::Board;
use crate::error::InvalidAction;
use tracing::{instrument, warn};

/// Whether `player` may perform `action` on the board as it stands.
///
/// Wall placements also need a wall left in the player's stock.
pub fn is_action_valid(board: &Board, action: Action, player: usize) -> bool {
    if player >= board.player_count() {
        return false;
    }
    match action {
        Action::Move(to) => can_move_here(board, player, to),
        Action::PlaceWall(wall) => {
            board.walls_left(player) > 0 && is_wall_possible_here(board, wall)
        }
    }
}

/// Applies `action` for `player`.
///
/// # Errors
///
/// Returns [`InvalidAction`] when the action is not legal; the board is
/// left exactly as it was.
#[instrument(level = "debug", skip(board), fields(action = %action))]
pub fn apply(board: &mut Board, action: Action, player: usize) -> Result<(), InvalidAction> {
    if !is_action_valid(board, action, player) {
        warn!(%action, player, "Rejected illegal action");
        return Err(InvalidAction { action, player });
    }
    match action {
        Action::Move(to) => board.move_pawn(player, to),
        Action::PlaceWall(wall) => board.place_wall(player, wall),
    }
    Ok(())
}

/// Every action `player` may take: pawn moves first, then walls.
pub fn legal_actions(board: &Board, player: usize) -> Vec<Action> {
    legal_pawn_moves(board, player)
        .into_iter()
        .map(Action::Move)
        .chain(
            legal_wall_moves(board, player)
                .into_iter()
                .map(Action::PlaceWall),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_apply_move() {
        let mut board = Board::new(2).unwrap();
        apply(&mut board, Action::move_to(1, 4), 0).unwrap();
        assert_eq!(board.pawn(0), Position::new(1, 4));
    }

    #[test]
    fn test_apply_wall_spends_stock() {
        let mut board = Board::new(2).unwrap();
        apply(&mut board, Action::vertical_wall(2, 3), 1).unwrap();
        assert!(board.vertical_walls().contains(Position::new(2, 3)));
        assert_eq!(board.walls_remaining(), &[10, 9]);
    }

    #[test]
    fn test_rejected_action_leaves_board_unchanged() {
        let mut board = Board::new(2).unwrap();
        let before = board.clone();

        let err = apply(&mut board, Action::move_to(3, 4), 0).unwrap_err();
        assert_eq!(
            err,
            InvalidAction {
                action: Action::move_to(3, 4),
                player: 0
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_wall_needs_stock() {
        let mut board = Board::with_starting_walls(2, vec![0, 1]).unwrap();
        assert!(!is_action_valid(&board, Action::horizontal_wall(4, 4), 0));
        assert!(apply(&mut board, Action::horizontal_wall(4, 4), 1).is_ok());
        assert!(!is_action_valid(&board, Action::horizontal_wall(6, 6), 1));
    }

    #[test]
    fn test_unknown_player_is_invalid() {
        let board = Board::new(2).unwrap();
        assert!(!is_action_valid(&board, Action::move_to(1, 4), 2));
    }

    #[test]
    fn test_legal_actions_lists_moves_then_walls() {
        let board = Board::new(2).unwrap();
        let actions = legal_actions(&board, 0);
        assert_eq!(actions.len(), 3 + 128);
        assert_eq!(actions[0], Action::move_to(1, 4));
        assert_eq!(actions[3], Action::horizontal_wall(0, 0));
        assert_eq!(actions[4], Action::vertical_wall(0, 0));
    }
}
