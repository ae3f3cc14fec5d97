//! Immutable chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - Board, active pieces, per-side state and side to move,
//!   frozen at construction
//! - [`Builder`] - Mutable staging area that produces a [`Position`]
//! - [`Piece`] and [`Tile`] - Value types for what stands where
//! - [`Move`] - Transitions that build the next position without touching
//!   the current one
//! - [`Player`] - Legality, check, checkmate and stalemate for one side
//! - FEN loading and perft counting
//!
//! # Architecture
//!
//! Squares are indexed 0..64 from a8 to h1. Each piece kind has its own
//! pseudo-legal generator; legality is decided by executing a move and
//! looking at whether the mover's king can be taken in the result.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{MoveFactory, MoveStatus, Position};
//!
//! let position = Position::standard();
//! let e4 = MoveFactory::create_move(
//!     &position,
//!     Square::from_algebraic("e2").unwrap(),
//!     Square::from_algebraic("e4").unwrap(),
//! );
//! let transition = position.current_player().make_move(&e4).unwrap();
//! assert_eq!(transition.status(), MoveStatus::Done);
//! println!("{}", transition.position());
//! ```

mod board;
mod error;
pub mod fen;
mod mov;
mod movegen;
mod perft;
mod piece;
mod player;
mod tile;

pub use board::{Board, Builder, Position};
pub use error::BoardError;
pub use fen::FenError;
pub use mov::{Move, MoveFactory, MoveKind};
pub use perft::{perft, perft_divide};
pub use piece::Piece;
pub use player::{MoveStatus, MoveTransition, Player, PlayerState};
pub use tile::Tile;
