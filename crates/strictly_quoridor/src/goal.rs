//! Goal predicates.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Where a player has to bring its pawn.
///
/// One axis is fixed to a target value; the other is a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Any cell of the given row.
    #[display("row {_0}")]
    Row(i8),
    /// Any cell of the given column.
    #[display("column {_0}")]
    Column(i8),
}

impl Goal {
    /// Whether `position` satisfies this goal.
    pub fn is_reached_by(self, position: Position) -> bool {
        match self {
            Goal::Row(row) => position.row == row,
            Goal::Column(col) => position.col == col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_goal_ignores_column() {
        let goal = Goal::Row(8);
        assert!(goal.is_reached_by(Position::new(8, 0)));
        assert!(goal.is_reached_by(Position::new(8, 8)));
        assert!(!goal.is_reached_by(Position::new(7, 8)));
    }

    #[test]
    fn test_column_goal_ignores_row() {
        let goal = Goal::Column(0);
        assert!(goal.is_reached_by(Position::new(3, 0)));
        assert!(!goal.is_reached_by(Position::new(0, 3)));
    }
}
