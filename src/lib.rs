//! A rules engine for xiangqi (Chinese chess).
//!
//! The crate is organized around three layers:
//!
//! * [`BitBoard`] and the [`attacks`] module: square-set algebra over the
//!   90-cell board and the per-piece geometric attack generators (palace,
//!   river and leg/eye blocking rules live here).
//! * [`Board`]: the piece placement store, queryable by color and role
//!   bitboards.
//! * [`Position`]: the actual rules engine.  It validates setups, computes
//!   checkers, generates legal destinations by probing a copy of the
//!   position, and reports game outcomes.
//!
//! ```
//! use xiangqi::{Position, MoveGen};
//!
//! let pos = Position::default();
//! assert_eq!(MoveGen::new_legal(&pos).len(), 44);
//! assert!(pos.outcome().is_none());
//! ```

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod board_builder;
pub mod color;
pub mod error;
pub mod file;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod rank;
pub mod square;
pub mod variant;

pub use crate::bitboard::{BitBoard, EMPTY};
pub use crate::board::Board;
pub use crate::board_builder::BoardBuilder;
pub use crate::color::{Color, ALL_COLORS, NUM_COLORS};
pub use crate::error::{Error, IllegalSetup};
pub use crate::file::{File, ALL_FILES, NUM_FILES};
pub use crate::game::{Action, Game, GameResult};
pub use crate::movegen::{MoveGen, MoveList};
pub use crate::moves::Move;
pub use crate::piece::{Piece, ALL_PIECES, NUM_PIECES};
pub use crate::position::{Context, DestsMap, Outcome, Position};
pub use crate::rank::{Rank, ALL_RANKS, NUM_RANKS};
pub use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
pub use crate::variant::Variant;
