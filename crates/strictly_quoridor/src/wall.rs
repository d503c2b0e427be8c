//! Walls and the bitset that stores them.

use crate::error::BoardError;
use crate::position::{ANCHOR_SIZE, Position};
use serde::{Deserialize, Serialize};

/// Direction a wall runs in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Blocks vertical movement across two columns.
    Horizontal,
    /// Blocks horizontal movement across two rows.
    Vertical,
}

/// A two-cell-wide barrier anchored on a grid intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{orientation} wall at {anchor}")]
pub struct Wall {
    /// Intersection the wall is centred on.
    pub anchor: Position,
    /// Direction the wall runs in.
    pub orientation: Orientation,
}

impl Wall {
    /// Creates a wall.
    pub const fn new(anchor: Position, orientation: Orientation) -> Self {
        Self {
            anchor,
            orientation,
        }
    }

    /// Creates a horizontal wall at `(row, col)`.
    pub const fn horizontal(row: i8, col: i8) -> Self {
        Self::new(Position::new(row, col), Orientation::Horizontal)
    }

    /// Creates a vertical wall at `(row, col)`.
    pub const fn vertical(row: i8, col: i8) -> Self {
        Self::new(Position::new(row, col), Orientation::Vertical)
    }

    /// The two anchors a same-orientation wall may not occupy next to this one.
    pub fn colinear_neighbors(self) -> [Position; 2] {
        match self.orientation {
            Orientation::Horizontal => [self.anchor.offset(0, -1), self.anchor.offset(0, 1)],
            Orientation::Vertical => [self.anchor.offset(-1, 0), self.anchor.offset(1, 0)],
        }
    }
}

/// Set of wall anchors of one orientation, one bit per intersection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Position>", try_from = "Vec<Position>")]
pub struct WallSet(u64);

impl WallSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    fn bit(anchor: Position) -> Option<u64> {
        anchor
            .is_anchor()
            .then(|| 1u64 << (anchor.row as u32 * ANCHOR_SIZE as u32 + anchor.col as u32))
    }

    /// Whether `anchor` holds a wall. Out-of-range anchors never do.
    pub fn contains(&self, anchor: Position) -> bool {
        Self::bit(anchor).is_some_and(|bit| self.0 & bit != 0)
    }

    /// Adds `anchor`; returns false if it was out of range or already present.
    pub fn insert(&mut self, anchor: Position) -> bool {
        match Self::bit(anchor) {
            Some(bit) if self.0 & bit == 0 => {
                self.0 |= bit;
                true
            }
            _ => false,
        }
    }

    /// Removes `anchor`; returns whether it was present.
    pub fn remove(&mut self, anchor: Position) -> bool {
        match Self::bit(anchor) {
            Some(bit) if self.0 & bit != 0 => {
                self.0 &= !bit;
                true
            }
            _ => false,
        }
    }

    /// Number of walls in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Anchors in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        (0..ANCHOR_SIZE)
            .flat_map(|row| (0..ANCHOR_SIZE).map(move |col| Position::new(row, col)))
            .filter(|anchor| self.contains(*anchor))
    }
}

impl From<WallSet> for Vec<Position> {
    fn from(set: WallSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<Position>> for WallSet {
    type Error = BoardError;

    fn try_from(anchors: Vec<Position>) -> Result<Self, Self::Error> {
        let mut set = WallSet::new();
        for anchor in anchors {
            if !anchor.is_anchor() {
                return Err(BoardError::AnchorOutOfRange { anchor });
            }
            set.insert(anchor);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut set = WallSet::new();
        assert!(set.insert(Position::new(3, 4)));
        assert!(!set.insert(Position::new(3, 4)));
        assert!(set.contains(Position::new(3, 4)));
        assert_eq!(set.len(), 1);

        assert!(set.remove(Position::new(3, 4)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_out_of_range_anchor_is_never_stored() {
        let mut set = WallSet::new();
        assert!(!set.insert(Position::new(8, 0)));
        assert!(!set.insert(Position::new(-1, 2)));
        assert!(!set.contains(Position::new(-1, 2)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iter_is_row_major() {
        let set = WallSet::try_from(vec![
            Position::new(7, 7),
            Position::new(0, 1),
            Position::new(2, 0),
        ])
        .unwrap();
        let anchors: Vec<_> = set.iter().collect();
        assert_eq!(
            anchors,
            vec![Position::new(0, 1), Position::new(2, 0), Position::new(7, 7)]
        );
    }

    #[test]
    fn test_colinear_neighbors() {
        assert_eq!(
            Wall::horizontal(2, 3).colinear_neighbors(),
            [Position::new(2, 2), Position::new(2, 4)]
        );
        assert_eq!(
            Wall::vertical(2, 3).colinear_neighbors(),
            [Position::new(1, 3), Position::new(3, 3)]
        );
    }
}
