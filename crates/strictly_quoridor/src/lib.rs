//! Strictly Quoridor - pure game logic for 2 and 4 player Quoridor
//!
//! Board state, move legality, wall safety checks, shortest paths and
//! scoring. No async and no I/O: the match orchestrator lives in
//! `strictly_arena`.
//!
//! # Architecture
//!
//! - **Board**: pawns, goals, wall stock and placed walls, always consistent
//! - **Rules**: pure functions over a board ([`rules`])
//! - **Action**: the `[kind, row, col]` wire form agents exchange
//!
//! # Example
//!
//! ```
//! use strictly_quoridor::{Action, Board, rules};
//!
//! let mut board = Board::new(2)?;
//! assert_eq!(rules::min_steps_before_victory(&board, 0), Ok(8));
//!
//! rules::apply(&mut board, Action::horizontal_wall(6, 3), 1)?;
//! assert_eq!(board.walls_remaining(), &[10, 9]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod goal;
mod position;
mod wall;

pub mod rules;

pub use action::{Action, ActionKind, ParseActionError};
pub use board::{Board, BoardSnapshot, TOTAL_WALLS};
pub use error::{BoardError, InvalidAction, NoPath};
pub use goal::Goal;
pub use position::{ANCHOR_SIZE, BOARD_SIZE, LAST_INDEX, MIDDLE_INDEX, Position};
pub use wall::{Orientation, Wall, WallSet};
