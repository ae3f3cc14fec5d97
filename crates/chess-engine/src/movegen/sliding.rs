//! Bishop, rook and queen generators: rays that stop at the first piece.

use super::{crosses_side_edge, push_step};
use crate::{Board, Move, Piece};

const BISHOP_DIRECTIONS: [i8; 4] = [-9, -7, 7, 9];
const ROOK_DIRECTIONS: [i8; 4] = [-8, -1, 1, 8];
const QUEEN_DIRECTIONS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub(super) fn bishop_moves(piece: &Piece, board: &Board) -> Vec<Move> {
    slide(piece, board, &BISHOP_DIRECTIONS)
}

pub(super) fn rook_moves(piece: &Piece, board: &Board) -> Vec<Move> {
    slide(piece, board, &ROOK_DIRECTIONS)
}

pub(super) fn queen_moves(piece: &Piece, board: &Board) -> Vec<Move> {
    slide(piece, board, &QUEEN_DIRECTIONS)
}

fn slide(piece: &Piece, board: &Board, directions: &[i8]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &direction in directions {
        let mut current = piece.square();
        // The edge check uses the square being left, not the destination.
        while !crosses_side_edge(current, direction) {
            let Some(next) = current.offset(direction) else {
                break;
            };
            if !push_step(piece, board, next, &mut moves) {
                break;
            }
            current = next;
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, MoveKind, Position};
    use chess_core::{PieceKind, Side, Square};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn position_with(pieces: &[Piece]) -> Position {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Side::White, sq("a1"), false, false))
            .set_piece(Piece::king(Side::Black, sq("a8"), false, false));
        for piece in pieces {
            builder.set_piece(*piece);
        }
        builder.build().unwrap()
    }

    #[test]
    fn rook_on_open_board() {
        let rook = Piece::new(PieceKind::Rook, Side::White, sq("d4"));
        let position = position_with(&[rook]);
        assert_eq!(rook_moves(&rook, position.board()).len(), 14);
    }

    #[test]
    fn rook_on_h_file_does_not_wrap() {
        let rook = Piece::new(PieceKind::Rook, Side::White, sq("h4"));
        let position = position_with(&[rook]);
        let moves = rook_moves(&rook, position.board());
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|m| m.destination() != sq("a3")));
    }

    #[test]
    fn rook_stops_at_blockers() {
        let rook = Piece::new(PieceKind::Rook, Side::White, sq("d4"));
        let friend = Piece::new(PieceKind::Pawn, Side::White, sq("d6"));
        let enemy = Piece::new(PieceKind::Knight, Side::Black, sq("f4"));
        let position = position_with(&[rook, friend, enemy]);
        let moves = rook_moves(&rook, position.board());

        assert!(moves.iter().any(|m| m.destination() == sq("d5")));
        assert!(moves.iter().all(|m| m.destination() != sq("d6")));
        assert!(moves.iter().all(|m| m.destination() != sq("g4")));
        let capture = moves.iter().find(|m| m.destination() == sq("f4")).unwrap();
        assert_eq!(capture.kind(), MoveKind::Capture(enemy));
        // d5, e4, f4x, c4 b4 a4, d3 d2 d1
        assert_eq!(moves.len(), 9);
    }

    #[test]
    fn bishop_on_edge_does_not_wrap() {
        let bishop = Piece::new(PieceKind::Bishop, Side::Black, sq("h5"));
        let position = position_with(&[bishop]);
        let moves = bishop_moves(&bishop, position.board());
        // g6 f7 e8 / g4 f3 e2 d1
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| m.destination().file() != chess_core::File::A));
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let queen = Piece::new(PieceKind::Queen, Side::White, sq("e5"));
        let rook = Piece::new(PieceKind::Rook, Side::White, sq("e5"));
        let bishop = Piece::new(PieceKind::Bishop, Side::White, sq("e5"));
        let position = position_with(&[queen]);
        let board = position.board();
        assert_eq!(
            queen_moves(&queen, board).len(),
            rook_moves(&rook, board).len() + bishop_moves(&bishop, board).len()
        );
    }
}
