//! Board state: pawns, goals, wall stock and placed walls.

use crate::error::BoardError;
use crate::goal::Goal;
use crate::position::{BOARD_SIZE, LAST_INDEX, MIDDLE_INDEX, Position};
use crate::rules::{movement, path};
use crate::wall::{Orientation, Wall, WallSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Walls shared among all players at the start of a match.
pub const TOTAL_WALLS: u8 = 20;

/// Plain, unchecked form of a [`Board`].
///
/// This is what agents receive and what traces persist. Turning it back
/// into a board with [`Board::from_snapshot`] checks every invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Pawn position per player.
    pub pawns: Vec<Position>,
    /// Goal per player.
    pub goals: Vec<Goal>,
    /// Walls each player may still place.
    pub walls_remaining: Vec<u8>,
    /// Anchors of placed horizontal walls.
    #[serde(default)]
    pub horizontal_walls: Vec<Position>,
    /// Anchors of placed vertical walls.
    #[serde(default)]
    pub vertical_walls: Vec<Position>,
}

/// A Quoridor board for 2 or 4 players.
///
/// Only the rules engine mutates a board, and only after validating the
/// action, so every reachable board keeps a path to each player's goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    pawns: Vec<Position>,
    goals: Vec<Goal>,
    walls_remaining: Vec<u8>,
    horizontal_walls: WallSet,
    vertical_walls: WallSet,
}

impl Board {
    /// Creates the default symmetric layout.
    ///
    /// With 2 players, player 0 starts at the top middle heading for the
    /// bottom row and player 1 the other way round. With 4 players the two
    /// extra pawns start on the left and right edges. The 20 walls are split
    /// evenly.
    #[instrument]
    pub fn new(player_count: usize) -> Result<Self, BoardError> {
        let (pawns, goals) = default_layout(player_count)?;
        let per_player = TOTAL_WALLS / player_count as u8;
        Ok(Self {
            pawns,
            goals,
            walls_remaining: vec![per_player; player_count],
            horizontal_walls: WallSet::new(),
            vertical_walls: WallSet::new(),
        })
    }

    /// Creates the default layout with a custom wall stock per player.
    #[instrument]
    pub fn with_starting_walls(player_count: usize, walls: Vec<u8>) -> Result<Self, BoardError> {
        let mut board = Self::new(player_count)?;
        if walls.len() != player_count {
            return Err(BoardError::StartingWallsMismatch {
                expected: player_count,
                actual: walls.len(),
            });
        }
        board.walls_remaining = walls;
        Ok(board)
    }

    /// Builds a board from an externally supplied snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the player count is unsupported, the per-player lists
    /// disagree in length, a pawn is off the grid or shares a cell, a wall
    /// is out of range, crosses or overlaps another, or some player is cut
    /// off from its goal.
    #[instrument(skip(snapshot), fields(players = snapshot.pawns.len()))]
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, BoardError> {
        let count = snapshot.pawns.len();
        if count != 2 && count != 4 {
            return Err(BoardError::UnsupportedPlayerCount { count });
        }
        for (field, actual) in [
            ("goals", snapshot.goals.len()),
            ("wall counts", snapshot.walls_remaining.len()),
        ] {
            if actual != count {
                return Err(BoardError::LengthMismatch {
                    field,
                    expected: count,
                    actual,
                });
            }
        }

        let mut occupied = HashSet::new();
        for (player, &position) in snapshot.pawns.iter().enumerate() {
            if !position.is_on_board() {
                return Err(BoardError::PawnOffBoard { player, position });
            }
            if !occupied.insert(position) {
                return Err(BoardError::PawnsOverlap { position });
            }
        }

        let horizontal_walls = WallSet::try_from(snapshot.horizontal_walls)?;
        let vertical_walls = WallSet::try_from(snapshot.vertical_walls)?;
        if let Some(anchor) = horizontal_walls
            .iter()
            .find(|anchor| vertical_walls.contains(*anchor))
        {
            return Err(BoardError::CrossingWalls { anchor });
        }
        for (set, orientation) in [
            (&horizontal_walls, Orientation::Horizontal),
            (&vertical_walls, Orientation::Vertical),
        ] {
            for anchor in set.iter() {
                let [_, next] = Wall::new(anchor, orientation).colinear_neighbors();
                if set.contains(next) {
                    return Err(BoardError::OverlappingWalls {
                        anchor,
                        orientation,
                    });
                }
            }
        }

        let board = Self {
            pawns: snapshot.pawns,
            goals: snapshot.goals,
            walls_remaining: snapshot.walls_remaining,
            horizontal_walls,
            vertical_walls,
        };
        if let Some(player) =
            (0..count).find(|&player| path::shortest_path(&board, player).is_err())
        {
            return Err(BoardError::Unreachable { player });
        }
        debug!("Board restored from snapshot");
        Ok(board)
    }

    /// Returns the plain form of this board.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            pawns: self.pawns.clone(),
            goals: self.goals.clone(),
            walls_remaining: self.walls_remaining.clone(),
            horizontal_walls: self.horizontal_walls.into(),
            vertical_walls: self.vertical_walls.into(),
        }
    }

    /// Number of players (2 or 4).
    pub fn player_count(&self) -> usize {
        self.pawns.len()
    }

    /// Pawn positions, indexed by player.
    pub fn pawns(&self) -> &[Position] {
        &self.pawns
    }

    /// Pawn position of `player`.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a seat on this board.
    pub fn pawn(&self, player: usize) -> Position {
        self.pawns[player]
    }

    /// Goals, indexed by player.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Goal of `player`.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a seat on this board.
    pub fn goal(&self, player: usize) -> Goal {
        self.goals[player]
    }

    /// Walls each player may still place.
    pub fn walls_remaining(&self) -> &[u8] {
        &self.walls_remaining
    }

    /// Walls `player` may still place.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a seat on this board.
    pub fn walls_left(&self, player: usize) -> u8 {
        self.walls_remaining[player]
    }

    /// Placed horizontal walls.
    pub fn horizontal_walls(&self) -> &WallSet {
        &self.horizontal_walls
    }

    /// Placed vertical walls.
    pub fn vertical_walls(&self) -> &WallSet {
        &self.vertical_walls
    }

    /// Placed walls of one orientation.
    pub fn walls(&self, orientation: Orientation) -> &WallSet {
        match orientation {
            Orientation::Horizontal => &self.horizontal_walls,
            Orientation::Vertical => &self.vertical_walls,
        }
    }

    pub(crate) fn walls_mut(&mut self, orientation: Orientation) -> &mut WallSet {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal_walls,
            Orientation::Vertical => &mut self.vertical_walls,
        }
    }

    /// Positions of every pawn except `player`'s.
    pub fn opponents(&self, player: usize) -> Vec<Position> {
        self.pawns
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != player)
            .map(|(_, position)| *position)
            .collect()
    }

    /// Whether `player`'s pawn satisfies its goal.
    pub fn is_player_on_goal(&self, player: usize) -> bool {
        self.goals[player].is_reached_by(self.pawns[player])
    }

    /// Goal status per player.
    pub fn players_on_goal(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.player_count()).map(|player| self.is_player_on_goal(player))
    }

    /// Whether all players but one have reached their goal.
    pub fn is_finished(&self) -> bool {
        let finished = self.players_on_goal().filter(|on_goal| *on_goal).count();
        finished + 1 == self.player_count()
    }

    pub(crate) fn move_pawn(&mut self, player: usize, to: Position) {
        self.pawns[player] = to;
    }

    pub(crate) fn place_wall(&mut self, player: usize, wall: Wall) {
        self.walls_mut(wall.orientation).insert(wall.anchor);
        self.walls_remaining[player] -= 1;
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        Self::from_snapshot(snapshot)
    }
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        BoardSnapshot {
            pawns: board.pawns,
            goals: board.goals,
            walls_remaining: board.walls_remaining,
            horizontal_walls: board.horizontal_walls.into(),
            vertical_walls: board.vertical_walls.into(),
        }
    }
}

fn default_layout(player_count: usize) -> Result<(Vec<Position>, Vec<Goal>), BoardError> {
    let (last, middle) = (LAST_INDEX, MIDDLE_INDEX);
    match player_count {
        2 => Ok((
            vec![Position::new(0, middle), Position::new(last, middle)],
            vec![Goal::Row(last), Goal::Row(0)],
        )),
        4 => Ok((
            vec![
                Position::new(0, middle),
                Position::new(middle, last),
                Position::new(last, middle),
                Position::new(middle, 0),
            ],
            vec![
                Goal::Row(last),
                Goal::Column(0),
                Goal::Row(0),
                Goal::Column(last),
            ],
        )),
        count => Err(BoardError::UnsupportedPlayerCount { count }),
    }
}

/// Renders pawns as `P0`..`P3`, free cells as `::`, and walls as `|` and `--`.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Position::new(row, col);
                match self.pawns.iter().position(|pawn| *pawn == cell) {
                    Some(player) => write!(f, "P{player}")?,
                    None => f.write_str("::")?,
                }
                if col < LAST_INDEX {
                    let wall = movement::is_wall_between(self, cell, cell.offset(0, 1));
                    f.write_str(if wall { "|" } else { " " })?;
                }
            }
            writeln!(f)?;
            if row < LAST_INDEX {
                for col in 0..BOARD_SIZE {
                    let cell = Position::new(row, col);
                    let wall = movement::is_wall_between(self, cell, cell.offset(1, 0));
                    f.write_str(if wall { "--" } else { "  " })?;
                    if col < LAST_INDEX {
                        f.write_str(" ")?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_two_player_layout() {
        let board = Board::new(2).unwrap();
        assert_eq!(board.pawns(), &[Position::new(0, 4), Position::new(8, 4)]);
        assert_eq!(board.goals(), &[Goal::Row(8), Goal::Row(0)]);
        assert_eq!(board.walls_remaining(), &[10, 10]);
        assert!(board.horizontal_walls().is_empty());
        assert!(board.vertical_walls().is_empty());
    }

    #[test]
    fn test_default_four_player_layout() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.player_count(), 4);
        assert_eq!(board.walls_remaining(), &[5, 5, 5, 5]);
        assert_eq!(board.pawn(1), Position::new(4, 8));
        assert_eq!(board.goal(3), Goal::Column(8));
    }

    #[test]
    fn test_unsupported_player_count() {
        assert_eq!(
            Board::new(3),
            Err(BoardError::UnsupportedPlayerCount { count: 3 })
        );
    }

    #[test]
    fn test_starting_walls_must_match_player_count() {
        assert_eq!(
            Board::with_starting_walls(2, vec![3, 3, 3]),
            Err(BoardError::StartingWallsMismatch {
                expected: 2,
                actual: 3
            })
        );
        let board = Board::with_starting_walls(2, vec![3, 7]).unwrap();
        assert_eq!(board.walls_remaining(), &[3, 7]);
    }

    #[test]
    fn test_is_finished_needs_all_but_one() {
        let mut board = Board::new(4).unwrap();
        board.move_pawn(0, Position::new(8, 3));
        board.move_pawn(1, Position::new(4, 0));
        assert!(!board.is_finished());
        board.move_pawn(2, Position::new(0, 5));
        assert!(board.is_finished());
    }

    #[test]
    fn test_display_marks_pawns_and_walls() {
        let mut board = Board::new(2).unwrap();
        board.place_wall(0, Wall::horizontal(0, 3));
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 17);
        assert!(lines[0].contains("P0"));
        assert!(lines[16].contains("P1"));
        assert_eq!(lines[1].matches("--").count(), 2);
    }
}
