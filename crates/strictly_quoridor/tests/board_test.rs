//! Tests for board construction from snapshots and its serialized form.

use strictly_quoridor::{
    Action, Board, BoardError, BoardSnapshot, Goal, Orientation, Position, rules,
};

fn snapshot() -> BoardSnapshot {
    Board::new(2).unwrap().snapshot()
}

#[test]
fn test_snapshot_round_trip() {
    let mut board = Board::new(4).unwrap();
    rules::apply(&mut board, Action::horizontal_wall(2, 2), 0).unwrap();
    rules::apply(&mut board, Action::move_to(4, 7), 1).unwrap();
    assert_eq!(Board::from_snapshot(board.snapshot()), Ok(board));
}

#[test]
fn test_serde_round_trip() {
    let mut board = Board::new(2).unwrap();
    rules::apply(&mut board, Action::vertical_wall(5, 1), 1).unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn test_snapshot_json_shape() {
    let json = r#"{
        "pawns": [{"row": 0, "col": 4}, {"row": 8, "col": 4}],
        "goals": [{"row": 8}, {"row": 0}],
        "walls_remaining": [10, 9],
        "horizontal_walls": [{"row": 3, "col": 3}]
    }"#;
    let board: Board = serde_json::from_str(json).unwrap();
    assert_eq!(board.walls_remaining(), &[10, 9]);
    assert!(board.horizontal_walls().contains(Position::new(3, 3)));
    assert!(board.vertical_walls().is_empty());
}

#[test]
fn test_invalid_snapshot_fails_deserialization() {
    let json = r#"{
        "pawns": [{"row": 0, "col": 4}, {"row": 0, "col": 4}],
        "goals": [{"row": 8}, {"row": 0}],
        "walls_remaining": [10, 10]
    }"#;
    assert!(serde_json::from_str::<Board>(json).is_err());
}

#[test]
fn test_rejects_three_players() {
    let mut snap = snapshot();
    snap.pawns.push(Position::new(4, 0));
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::UnsupportedPlayerCount { count: 3 })
    );
}

#[test]
fn test_rejects_length_mismatch() {
    let mut snap = snapshot();
    snap.walls_remaining.pop();
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::LengthMismatch {
            field: "wall counts",
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn test_rejects_pawn_off_board() {
    let mut snap = snapshot();
    snap.pawns[1] = Position::new(9, 4);
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::PawnOffBoard {
            player: 1,
            position: Position::new(9, 4)
        })
    );
}

#[test]
fn test_rejects_shared_cell() {
    let mut snap = snapshot();
    snap.pawns[1] = Position::new(0, 4);
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::PawnsOverlap {
            position: Position::new(0, 4)
        })
    );
}

#[test]
fn test_rejects_out_of_range_anchor() {
    let mut snap = snapshot();
    snap.vertical_walls.push(Position::new(2, 8));
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::AnchorOutOfRange {
            anchor: Position::new(2, 8)
        })
    );
}

#[test]
fn test_rejects_crossing_walls() {
    let mut snap = snapshot();
    snap.horizontal_walls.push(Position::new(4, 4));
    snap.vertical_walls.push(Position::new(4, 4));
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::CrossingWalls {
            anchor: Position::new(4, 4)
        })
    );
}

#[test]
fn test_rejects_overlapping_walls() {
    let mut snap = snapshot();
    snap.vertical_walls = vec![Position::new(4, 4), Position::new(5, 4)];
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::OverlappingWalls {
            anchor: Position::new(4, 4),
            orientation: Orientation::Vertical
        })
    );
}

#[test]
fn test_rejects_unreachable_goal() {
    // Player 0 boxed into the two top-left cells.
    let mut snap = snapshot();
    snap.pawns[0] = Position::new(0, 0);
    snap.horizontal_walls.push(Position::new(0, 0));
    snap.vertical_walls.push(Position::new(0, 1));
    assert_eq!(
        Board::from_snapshot(snap),
        Err(BoardError::Unreachable { player: 0 })
    );
}

#[test]
fn test_column_goals() {
    let board = Board::new(4).unwrap();
    assert_eq!(board.goal(1), Goal::Column(0));
    assert!(Goal::Column(0).is_reached_by(Position::new(7, 0)));
    assert!(!Goal::Column(0).is_reached_by(Position::new(0, 7)));
}
