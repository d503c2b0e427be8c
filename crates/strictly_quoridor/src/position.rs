//! Grid coordinates shared by pawns and wall anchors.

use serde::{Deserialize, Serialize};

/// Width and height of the pawn grid.
pub const BOARD_SIZE: i8 = 9;

/// Index of the last row (or column) of the pawn grid.
pub const LAST_INDEX: i8 = BOARD_SIZE - 1;

/// Index of the middle row (or column), where pawns start.
pub const MIDDLE_INDEX: i8 = BOARD_SIZE / 2;

/// Width and height of the wall anchor grid.
///
/// Anchors sit on the intersections between cells, so there is one
/// fewer of them per axis than there are cells.
pub const ANCHOR_SIZE: i8 = BOARD_SIZE - 1;

/// A `(row, col)` coordinate.
///
/// The same type addresses cells on the 9x9 pawn grid and intersections
/// on the 8x8 anchor grid. Coordinates are signed so that candidate
/// offsets may step off the grid and be rejected rather than wrap.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: i8,
    /// Column index, 0 on the left.
    pub col: i8,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by `(d_row, d_col)`.
    ///
    /// Saturates instead of overflowing, which keeps arbitrary wire input
    /// from panicking; saturated positions are always off the grid.
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }

    /// Whether this position is a cell of the pawn grid.
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Whether this position is an intersection of the anchor grid.
    pub fn is_anchor(self) -> bool {
        (0..ANCHOR_SIZE).contains(&self.row) && (0..ANCHOR_SIZE).contains(&self.col)
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        let d_row = (i32::from(self.row) - i32::from(other.row)).unsigned_abs();
        let d_col = (i32::from(self.col) - i32::from(other.col)).unsigned_abs();
        d_row + d_col
    }

    /// Array indices for a cell of the pawn grid, `None` when off the grid.
    pub(crate) fn cell_index(self) -> Option<(usize, usize)> {
        self.is_on_board()
            .then(|| (self.row as usize, self.col as usize))
    }
}

impl From<(i8, i8)> for Position {
    fn from((row, col): (i8, i8)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        assert!(Position::new(0, 0).is_on_board());
        assert!(Position::new(8, 8).is_on_board());
        assert!(!Position::new(9, 0).is_on_board());
        assert!(!Position::new(0, -1).is_on_board());

        assert!(Position::new(7, 7).is_anchor());
        assert!(!Position::new(8, 0).is_anchor());
    }

    #[test]
    fn test_offset_saturates() {
        let far = Position::new(i8::MAX, 0).offset(2, 0);
        assert_eq!(far.row, i8::MAX);
        assert!(!far.is_on_board());
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(4, 4).manhattan(Position::new(5, 3)), 2);
        assert_eq!(Position::new(0, 0).manhattan(Position::new(0, 0)), 0);
    }
}
