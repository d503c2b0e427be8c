//! Error types for board construction and rule checks.

use crate::action::Action;
use crate::position::Position;
use crate::wall::Orientation;
use derive_more::{Display, Error};

/// A board could not be constructed.
///
/// Raised at the boundary, before any match begins.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Only 2 and 4 players are supported.
    #[display("unsupported player count {count}: only 2 or 4 players are supported")]
    UnsupportedPlayerCount {
        /// The rejected count.
        count: usize,
    },

    /// The starting wall list does not have one entry per player.
    #[display("{actual} starting wall counts given for {expected} players")]
    StartingWallsMismatch {
        /// Player count.
        expected: usize,
        /// Length of the supplied list.
        actual: usize,
    },

    /// A per-player list of a snapshot has the wrong length.
    #[display("snapshot has {actual} {field} for {expected} players")]
    LengthMismatch {
        /// Name of the offending list.
        field: &'static str,
        /// Player count.
        expected: usize,
        /// Length of the list.
        actual: usize,
    },

    /// A pawn lies outside the 9x9 grid.
    #[display("pawn of player {player} is off the board at {position}")]
    PawnOffBoard {
        /// Owner of the pawn.
        player: usize,
        /// Offending position.
        position: Position,
    },

    /// Two pawns share a cell.
    #[display("two pawns share the cell {position}")]
    PawnsOverlap {
        /// The shared cell.
        position: Position,
    },

    /// A wall anchor lies outside the 8x8 intersection grid.
    #[display("wall anchor {anchor} is outside the intersection grid")]
    AnchorOutOfRange {
        /// Offending anchor.
        anchor: Position,
    },

    /// An anchor hosts both a horizontal and a vertical wall.
    #[display("anchor {anchor} hosts walls of both orientations")]
    CrossingWalls {
        /// The doubly used anchor.
        anchor: Position,
    },

    /// Two same-orientation walls sit on adjacent colinear anchors.
    #[display("{orientation} walls overlap at {anchor}")]
    OverlappingWalls {
        /// One of the two anchors.
        anchor: Position,
        /// Orientation of both walls.
        orientation: Orientation,
    },

    /// The layout leaves a player without any path to its goal.
    #[display("player {player} has no path to its goal")]
    Unreachable {
        /// The stranded player.
        player: usize,
    },
}

/// An action was rejected by the rules. The board was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{action} is not legal for player {player}")]
pub struct InvalidAction {
    /// The rejected action.
    pub action: Action,
    /// The player that attempted it.
    pub player: usize,
}

/// No sequence of moves leads the player to its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("player {player} has no path to its goal")]
pub struct NoPath {
    /// The stranded player.
    pub player: usize,
}
