//! Immutable piece values.

use std::fmt;
use std::hash::{Hash, Hasher};

use chess_core::{PieceKind, Side, Square};

use crate::movegen;
use crate::{Board, Move};

/// A piece standing on a particular square.
///
/// Pieces are plain values: two pieces with the same kind, square, side and
/// first-move flag are interchangeable, and equality ignores the king-only
/// castling flags. "Moving" a piece always produces a new value.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    square: Square,
    first_move: bool,
    king_side_capable: bool,
    queen_side_capable: bool,
    castled: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    ///
    /// Kings created this way cannot castle; use [`Piece::king`] for that.
    pub const fn new(kind: PieceKind, side: Side, square: Square) -> Self {
        Piece {
            kind,
            side,
            square,
            first_move: true,
            king_side_capable: false,
            queen_side_capable: false,
            castled: false,
        }
    }

    /// Creates an unmoved king with the given castling capabilities.
    pub const fn king(
        side: Side,
        square: Square,
        king_side_capable: bool,
        queen_side_capable: bool,
    ) -> Self {
        Piece {
            kind: PieceKind::King,
            side,
            square,
            first_move: true,
            king_side_capable,
            queen_side_capable,
            castled: false,
        }
    }

    /// Returns a copy with the first-move flag replaced.
    pub const fn with_first_move(mut self, first_move: bool) -> Self {
        self.first_move = first_move;
        self
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// True until the piece has made its first move.
    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Material weight of this piece.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.kind.value()
    }

    pub const fn is_king_side_castle_capable(&self) -> bool {
        self.king_side_capable
    }

    pub const fn is_queen_side_castle_capable(&self) -> bool {
        self.queen_side_capable
    }

    /// True for a king that reached its square by castling.
    pub const fn is_castled(&self) -> bool {
        self.castled
    }

    /// Returns this piece after moving to `destination`.
    ///
    /// The result has its first-move flag cleared; a king also gives up both
    /// castling capabilities.
    pub const fn moved_to(self, destination: Square, castled: bool) -> Self {
        Piece {
            kind: self.kind,
            side: self.side,
            square: destination,
            first_move: false,
            king_side_capable: false,
            queen_side_capable: false,
            castled: castled && self.kind.is_king(),
        }
    }

    /// Returns the piece a pawn turns into on reaching `destination`.
    pub const fn promoted_to(self, kind: PieceKind, destination: Square) -> Self {
        Piece::new(kind, self.side, destination).with_first_move(false)
    }

    /// Generates the pseudo-legal moves of this piece on `board`.
    ///
    /// These respect movement patterns, edges and blocking, but not the
    /// safety of the mover's own king.
    pub fn generate_moves(&self, board: &Board) -> Vec<Move> {
        movegen::generate(self, board)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.square == other.square
            && self.side == other.side
            && self.first_move == other.first_move
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.side.hash(state);
        self.square.hash(state);
        self.first_move.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.to_fen_char(self.side))
    }
}
