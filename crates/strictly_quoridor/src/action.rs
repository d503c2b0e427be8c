//! First-class action types.
//!
//! Actions are what agents return and what the trace records. On the wire
//! an action is the 3-tuple `[kind, row, col]`.

use crate::position::Position;
use crate::wall::{Orientation, Wall};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The `kind` element of a wire action.
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
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ActionKind {
    /// Move the pawn to `(row, col)`.
    #[serde(rename = "move")]
    #[strum(serialize = "move")]
    Move,
    /// Place a horizontal wall anchored at `(row, col)`.
    #[serde(rename = "wall-horizontal")]
    #[strum(serialize = "wall-horizontal")]
    WallHorizontal,
    /// Place a vertical wall anchored at `(row, col)`.
    #[serde(rename = "wall-vertical")]
    #[strum(serialize = "wall-vertical")]
    WallVertical,
}

/// Something a player does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireAction", into = "WireAction")]
pub enum Action {
    /// Move the player's pawn to a cell.
    Move(Position),
    /// Place one of the player's walls.
    PlaceWall(Wall),
}

#[derive(Serialize, Deserialize)]
struct WireAction(ActionKind, i8, i8);

impl Action {
    /// Pawn move to `(row, col)`.
    pub const fn move_to(row: i8, col: i8) -> Self {
        Action::Move(Position::new(row, col))
    }

    /// Horizontal wall at `(row, col)`.
    pub const fn horizontal_wall(row: i8, col: i8) -> Self {
        Action::PlaceWall(Wall::horizontal(row, col))
    }

    /// Vertical wall at `(row, col)`.
    pub const fn vertical_wall(row: i8, col: i8) -> Self {
        Action::PlaceWall(Wall::vertical(row, col))
    }

    /// Wire kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move(_) => ActionKind::Move,
            Action::PlaceWall(wall) => match wall.orientation {
                Orientation::Horizontal => ActionKind::WallHorizontal,
                Orientation::Vertical => ActionKind::WallVertical,
            },
        }
    }

    /// Cell (for moves) or anchor (for walls) this action targets.
    pub fn target(&self) -> Position {
        match self {
            Action::Move(position) => *position,
            Action::PlaceWall(wall) => wall.anchor,
        }
    }
}

impl From<WireAction> for Action {
    fn from(WireAction(kind, row, col): WireAction) -> Self {
        match kind {
            ActionKind::Move => Action::move_to(row, col),
            ActionKind::WallHorizontal => Action::horizontal_wall(row, col),
            ActionKind::WallVertical => Action::vertical_wall(row, col),
        }
    }
}

impl From<Action> for WireAction {
    fn from(action: Action) -> Self {
        let target = action.target();
        WireAction(action.kind(), target.row, target.col)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())
    }
}

/// Error parsing an action typed as `kind, row, col`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot parse action {input:?}: expected `kind, row, col`")]
pub struct ParseActionError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseActionError {
            input: s.to_string(),
        };
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [kind, row, col] = parts.as_slice() else {
            return Err(err());
        };
        let kind = ActionKind::from_str(kind).map_err(|_| err())?;
        let row = row.parse::<i8>().map_err(|_| err())?;
        let col = col.parse::<i8>().map_err(|_| err())?;
        Ok(WireAction(kind, row, col).into())
    }
}
