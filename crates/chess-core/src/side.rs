//! Side (alliance) representation.

use crate::geometry::{EIGHTH_RANK, FIRST_RANK, SECOND_RANK, SEVENTH_RANK};
use crate::Square;

/// The two sides of a game.
///
/// Square indices grow from Black's back rank (a8 = 0) towards White's
/// (h1 = 63), so White pawns advance towards lower indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    /// Both sides, White first.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Direction of pawn travel along the index axis.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite_direction(self) -> i8 {
        -self.direction()
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Side::Black)
    }

    /// Returns true if a pawn of this side promotes on `square`.
    #[inline]
    pub const fn is_promotion_square(self, square: Square) -> bool {
        match self {
            Side::White => EIGHTH_RANK[square.index() as usize],
            Side::Black => FIRST_RANK[square.index() as usize],
        }
    }

    /// Returns true if `square` is on this side's pawn starting rank.
    #[inline]
    pub const fn is_pawn_start_square(self, square: Square) -> bool {
        match self {
            Side::White => SECOND_RANK[square.index() as usize],
            Side::Black => SEVENTH_RANK[square.index() as usize],
        }
    }

    /// Row (0-7, top to bottom) holding this side's back rank.
    #[inline]
    pub const fn back_rank_row(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}
