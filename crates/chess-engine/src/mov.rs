//! Move representation and execution.

use std::fmt;
use std::hash::{Hash, Hasher};

use chess_core::{PieceKind, Side, Square};

use crate::{BoardError, Builder, Piece, Position};

/// What kind of transition a [`Move`] describes, with the data needed to
/// rebuild the resulting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// A non-capturing move, including a single pawn push.
    Quiet,
    /// A piece other than a pawn takes the given piece.
    Capture(Piece),
    /// A pawn advances two squares from its starting rank.
    PawnDoubleStep,
    /// A pawn takes diagonally.
    PawnCapture(Piece),
    /// A pawn takes the pawn that just double-stepped past it.
    PawnEnPassantCapture(Piece),
    /// A pawn reaches the last rank, optionally capturing on the way.
    PawnPromotion {
        captured: Option<Piece>,
        promote_to: PieceKind,
    },
    /// The king castles towards the h-file rook.
    CastleKingSide { rook: Piece, rook_destination: Square },
    /// The king castles towards the a-file rook.
    CastleQueenSide { rook: Piece, rook_destination: Square },
    /// Sentinel for "no such move"; never executable.
    Null,
}

/// A transition from one position to the next.
///
/// Moves compare equal when they share origin, destination and moving
/// piece; the capture, castling and promotion payload is not compared.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    piece: Piece,
    destination: Square,
    kind: MoveKind,
}

impl Move {
    /// Placeholder returned when a lookup finds nothing (not a legal move).
    pub const NULL: Move = Move {
        piece: Piece::new(PieceKind::Pawn, Side::White, Square::A8),
        destination: Square::A8,
        kind: MoveKind::Null,
    };

    /// Creates a move of `piece` to `destination`.
    #[inline]
    pub const fn new(piece: Piece, destination: Square, kind: MoveKind) -> Self {
        Move {
            piece,
            destination,
            kind,
        }
    }

    /// Square the piece moves from. Meaningless for [`Move::NULL`].
    #[inline]
    pub const fn origin(&self) -> Square {
        self.piece.square()
    }

    #[inline]
    pub const fn destination(&self) -> Square {
        self.destination
    }

    #[inline]
    pub const fn moved_piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self.kind, MoveKind::Null)
    }

    /// True if the move removes an enemy piece.
    pub const fn is_attack(&self) -> bool {
        self.attacked_piece().is_some()
    }

    /// The piece this move captures, if any.
    pub const fn attacked_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture(piece)
            | MoveKind::PawnCapture(piece)
            | MoveKind::PawnEnPassantCapture(piece) => Some(piece),
            MoveKind::PawnPromotion { captured, .. } => captured,
            _ => None,
        }
    }

    pub const fn is_castling(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingSide { .. } | MoveKind::CastleQueenSide { .. }
        )
    }

    /// The rook that moves alongside the king when castling.
    pub const fn castle_rook(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::CastleKingSide { rook, .. } | MoveKind::CastleQueenSide { rook, .. } => {
                Some(rook)
            }
            _ => None,
        }
    }

    pub const fn rook_origin(&self) -> Option<Square> {
        match self.castle_rook() {
            Some(rook) => Some(rook.square()),
            None => None,
        }
    }

    pub const fn rook_destination(&self) -> Option<Square> {
        match self.kind {
            MoveKind::CastleKingSide {
                rook_destination, ..
            }
            | MoveKind::CastleQueenSide {
                rook_destination, ..
            } => Some(rook_destination),
            _ => None,
        }
    }

    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::PawnPromotion { .. })
    }

    /// The piece kind a promotion produces.
    pub const fn promotion_kind(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::PawnPromotion { promote_to, .. } => Some(promote_to),
            _ => None,
        }
    }

    /// Returns this promotion with a different target kind.
    ///
    /// Generators always offer the queen; callers use this to under-promote.
    /// Non-promotions, and requests for a pawn or king, come back unchanged.
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        match self.kind {
            MoveKind::PawnPromotion { captured, .. } if PieceKind::PROMOTIONS.contains(&kind) => {
                Move {
                    kind: MoveKind::PawnPromotion {
                        captured,
                        promote_to: kind,
                    },
                    ..self
                }
            }
            _ => self,
        }
    }

    /// Builds the position that results from playing this move on
    /// `position`.
    ///
    /// `position` is left untouched. No legality check happens here; use
    /// [`Player::make_move`](crate::Player::make_move) for that.
    ///
    /// # Errors
    ///
    /// [`BoardError::NullMove`] for the null move, or a construction error
    /// if the move does not belong to `position` and yields an invalid board.
    pub fn execute(&self, position: &Position) -> Result<Position, BoardError> {
        if self.is_null() {
            return Err(BoardError::NullMove);
        }

        let mover = self.piece.side();
        let captured = self.attacked_piece();
        let rook = self.castle_rook();
        let mut builder = Builder::new();

        for piece in position.active_pieces(mover) {
            if *piece != self.piece && Some(*piece) != rook {
                builder.set_piece(*piece);
            }
        }
        for piece in position.active_pieces(mover.opposite()) {
            if Some(*piece) != captured {
                builder.set_piece(*piece);
            }
        }

        let landed = match self.kind {
            MoveKind::PawnPromotion { promote_to, .. } => {
                self.piece.promoted_to(promote_to, self.destination)
            }
            _ => self.piece.moved_to(self.destination, self.is_castling()),
        };
        builder.set_piece(landed);

        if let (Some(rook), Some(rook_destination)) = (rook, self.rook_destination()) {
            builder.set_piece(rook.moved_to(rook_destination, false));
        }
        if matches!(self.kind, MoveKind::PawnDoubleStep) {
            builder.set_en_passant_pawn(landed);
        }
        builder.set_move_maker(mover.opposite());
        builder.build()
    }

    /// Origin and destination squares, with a promotion suffix (`e7e8q`).
    pub fn to_coordinates(&self) -> String {
        match self.promotion_kind() {
            Some(kind) => format!(
                "{}{}{}",
                self.origin(),
                self.destination,
                kind.symbol().to_ascii_lowercase()
            ),
            None => format!("{}{}", self.origin(), self.destination),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => {
                self.origin() == other.origin()
                    && self.destination == other.destination
                    && self.piece == other.piece
            }
            _ => false,
        }
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_null().hash(state);
        if !self.is_null() {
            self.destination.hash(state);
            self.piece.hash(state);
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.origin().file();
        match self.kind {
            MoveKind::Null => write!(f, "--"),
            MoveKind::CastleKingSide { .. } => write!(f, "O-O"),
            MoveKind::CastleQueenSide { .. } => write!(f, "O-O-O"),
            MoveKind::Quiet | MoveKind::PawnDoubleStep if self.piece.kind().is_pawn() => {
                write!(f, "{}", self.destination)
            }
            MoveKind::PawnCapture(_) | MoveKind::PawnEnPassantCapture(_) => {
                write!(f, "{}x{}", file, self.destination)
            }
            MoveKind::PawnPromotion {
                captured,
                promote_to,
            } => {
                if captured.is_some() {
                    write!(f, "{}x", file)?;
                }
                write!(f, "{}={}", self.destination, promote_to)
            }
            MoveKind::Capture(_) => {
                write!(f, "{}x{}", self.piece.kind(), self.destination)
            }
            MoveKind::Quiet | MoveKind::PawnDoubleStep => {
                write!(f, "{}{}", self.piece.kind(), self.destination)
            }
        }
    }
}

/// Translates externally supplied coordinates into engine moves.
pub struct MoveFactory;

impl MoveFactory {
    /// Finds the legal move of either side from `origin` to `destination`.
    ///
    /// Scans white's moves, then black's, and returns the first match, or
    /// [`Move::NULL`] if there is none. Check the result with
    /// [`Move::is_null`] before playing it.
    pub fn create_move(position: &Position, origin: Square, destination: Square) -> Move {
        position
            .all_legal_moves()
            .find(|m| m.origin() == origin && m.destination() == destination)
            .copied()
            .unwrap_or(Move::NULL)
    }
}
