//! Knight and king generators: a fixed list of single jumps.

use chess_core::geometry::{EIGHTH_COLUMN, FIRST_COLUMN, SECOND_COLUMN, SEVENTH_COLUMN};
use chess_core::Square;

use super::{crosses_side_edge, push_step};
use crate::{Board, Move, Piece};

const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub(super) fn knight_moves(piece: &Piece, board: &Board) -> Vec<Move> {
    step(piece, board, &KNIGHT_OFFSETS, knight_wraps)
}

pub(super) fn king_moves(piece: &Piece, board: &Board) -> Vec<Move> {
    step(piece, board, &KING_OFFSETS, crosses_side_edge)
}

fn step(
    piece: &Piece,
    board: &Board,
    offsets: &[i8],
    wraps: fn(Square, i8) -> bool,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        if wraps(piece.square(), offset) {
            continue;
        }
        if let Some(destination) = piece.square().offset(offset) {
            push_step(piece, board, destination, &mut moves);
        }
    }
    moves
}

/// Knight jumps reach two files sideways, so the two outer columns on each
/// edge need their own exclusions.
fn knight_wraps(square: Square, offset: i8) -> bool {
    let i = square.index() as usize;
    (FIRST_COLUMN[i] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[i] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[i] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[i] && matches!(offset, -15 | -6 | 10 | 17))
}
