//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the engine:
//! - [`Side`] for the two alliances and their direction of travel
//! - [`PieceKind`] for the six piece types and their material weight
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`geometry`] lookup tables for edge-of-board checks

pub mod geometry;
mod piece_kind;
mod side;
mod square;

pub use piece_kind::PieceKind;
pub use side::Side;
pub use square::{File, Rank, Square};
