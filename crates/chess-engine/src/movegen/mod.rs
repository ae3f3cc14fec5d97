//! Pseudo-legal move generation.
//!
//! Each piece kind has its own generator; [`generate`] dispatches on the
//! closed set of kinds. Generators look only at the moving piece and the
//! occupancy of the board. They never check whether the mover's own king
//! ends up attacked; [`Player::make_move`](crate::Player::make_move) does
//! that by executing the move.
//!
//! Offsets are in index space (see [`chess_core::geometry`]). Because plain
//! index arithmetic wraps from one row to the next, every generator first
//! consults the column tables to drop offsets that would leave the board
//! sideways.

mod pawn;
mod sliding;
mod stepping;

use chess_core::geometry::{EIGHTH_COLUMN, FIRST_COLUMN};
use chess_core::{PieceKind, Square};

use crate::{Board, Move, MoveKind, Piece};

pub(crate) use pawn::pawn_attack_squares;

/// Generates the pseudo-legal moves of a single piece.
pub(crate) fn generate(piece: &Piece, board: &Board) -> Vec<Move> {
    match piece.kind() {
        PieceKind::Pawn => pawn::pawn_moves(piece, board),
        PieceKind::Knight => stepping::knight_moves(piece, board),
        PieceKind::Bishop => sliding::bishop_moves(piece, board),
        PieceKind::Rook => sliding::rook_moves(piece, board),
        PieceKind::Queen => sliding::queen_moves(piece, board),
        PieceKind::King => stepping::king_moves(piece, board),
    }
}

/// Generates the pseudo-legal moves of every piece in `pieces`.
pub(crate) fn pseudo_legal_moves(board: &Board, pieces: &[Piece]) -> Vec<Move> {
    pieces
        .iter()
        .flat_map(|piece| generate(piece, board))
        .collect()
}

/// Returns true if stepping from `square` by a one-square offset (straight
/// or diagonal) would wrap around the left or right edge.
///
/// Shared by the king and the sliders, whose single steps are the same set.
#[inline]
fn crosses_side_edge(square: Square, offset: i8) -> bool {
    let i = square.index() as usize;
    (FIRST_COLUMN[i] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[i] && matches!(offset, -7 | 1 | 9))
}

/// Emits a quiet move or a capture onto `destination`, or nothing if a
/// friendly piece stands there. Returns whether the tile was empty.
#[inline]
fn push_step(piece: &Piece, board: &Board, destination: Square, moves: &mut Vec<Move>) -> bool {
    match board.piece_at(destination) {
        None => {
            moves.push(Move::new(*piece, destination, MoveKind::Quiet));
            true
        }
        Some(occupant) => {
            if occupant.side() != piece.side() {
                moves.push(Move::new(*piece, destination, MoveKind::Capture(occupant)));
            }
            false
        }
    }
}
