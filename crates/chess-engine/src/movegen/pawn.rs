//! Pawn generator: pushes, double steps, captures, en passant and
//! promotion.

use chess_core::geometry::{EIGHTH_COLUMN, FIRST_COLUMN};
use chess_core::{PieceKind, Side, Square};

use crate::{Board, Move, MoveKind, Piece};

/// Candidate offsets before scaling by the side's direction.
const PUSH: i8 = 8;
const DOUBLE_STEP: i8 = 16;
const DIAGONAL_RIGHT: i8 = 7;
const DIAGONAL_LEFT: i8 = 9;

pub(super) fn pawn_moves(pawn: &Piece, board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(4);
    let side = pawn.side();
    let from = pawn.square();

    if let Some(to) = from.offset(PUSH * side.direction()) {
        if !board.is_occupied(to) {
            moves.push(advance(pawn, to, None));
        }
    }

    if pawn.is_first_move() && side.is_pawn_start_square(from) {
        let between = from.offset(PUSH * side.direction());
        let to = from.offset(DOUBLE_STEP * side.direction());
        if let (Some(between), Some(to)) = (between, to) {
            if !board.is_occupied(between) && !board.is_occupied(to) {
                moves.push(Move::new(*pawn, to, MoveKind::PawnDoubleStep));
            }
        }
    }

    for offset in [DIAGONAL_RIGHT, DIAGONAL_LEFT] {
        if diagonal_wraps(side, from, offset) {
            continue;
        }
        let Some(to) = from.offset(offset * side.direction()) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.side() != side => moves.push(advance(pawn, to, Some(target))),
            Some(_) => {}
            None => {
                if let Some(victim) = en_passant_victim(pawn, board, offset) {
                    moves.push(Move::new(*pawn, to, MoveKind::PawnEnPassantCapture(victim)));
                }
            }
        }
    }

    moves
}

/// Squares a pawn attacks whether or not anything stands there.
pub(crate) fn pawn_attack_squares(pawn: &Piece) -> impl Iterator<Item = Square> + '_ {
    [DIAGONAL_RIGHT, DIAGONAL_LEFT]
        .into_iter()
        .filter(move |&offset| !diagonal_wraps(pawn.side(), pawn.square(), offset))
        .filter_map(move |offset| pawn.square().offset(offset * pawn.side().direction()))
}

/// A single step forward or diagonally, promoting on the last rank.
fn advance(pawn: &Piece, to: Square, captured: Option<Piece>) -> Move {
    if pawn.side().is_promotion_square(to) {
        return Move::new(
            *pawn,
            to,
            MoveKind::PawnPromotion {
                captured,
                promote_to: PieceKind::Queen,
            },
        );
    }
    match captured {
        Some(target) => Move::new(*pawn, to, MoveKind::PawnCapture(target)),
        None => Move::new(*pawn, to, MoveKind::Quiet),
    }
}

/// The diagonals are mirrored between the sides, so the column that blocks
/// each offset flips too.
fn diagonal_wraps(side: Side, from: Square, offset: i8) -> bool {
    let i = from.index() as usize;
    match offset {
        DIAGONAL_RIGHT => {
            (EIGHTH_COLUMN[i] && side.is_white()) || (FIRST_COLUMN[i] && side.is_black())
        }
        DIAGONAL_LEFT => {
            (FIRST_COLUMN[i] && side.is_white()) || (EIGHTH_COLUMN[i] && side.is_black())
        }
        _ => false,
    }
}

/// The board's en-passant pawn, if it is an enemy standing right beside
/// `pawn` on the side `offset` points to.
fn en_passant_victim(pawn: &Piece, board: &Board, offset: i8) -> Option<Piece> {
    let candidate = board.en_passant_pawn()?;
    let beside = match offset {
        DIAGONAL_RIGHT => pawn.square().offset(pawn.side().opposite_direction()),
        _ => pawn.square().offset(-pawn.side().opposite_direction()),
    }?;
    (candidate.square() == beside && candidate.side() != pawn.side()).then_some(candidate)
}
