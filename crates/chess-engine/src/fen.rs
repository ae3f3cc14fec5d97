//! FEN (Forsyth-Edwards Notation) loading and writing.
//!
//! Only board setup is read: placement, side to move, castling rights and
//! the en-passant target. The halfmove clock and fullmove number are
//! optional; when present they must be numbers, but they are not kept.

use chess_core::geometry::NUM_TILES_PER_ROW;
use chess_core::{File, PieceKind, Rank, Side, Square};
use thiserror::Error;

use crate::{BoardError, Builder, Piece, Position};

/// The standard starting position.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when loading a FEN string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active side: expected 'w' or 'b', got '{0}'")]
    InvalidActiveSide(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Default, Clone, Copy)]
struct CastlingRights {
    white_king_side: bool,
    white_queen_side: bool,
    black_king_side: bool,
    black_queen_side: bool,
}

impl CastlingRights {
    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = CastlingRights::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let flag = match c {
                'K' => &mut rights.white_king_side,
                'Q' => &mut rights.white_queen_side,
                'k' => &mut rights.black_king_side,
                'q' => &mut rights.black_queen_side,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "unexpected character '{c}' in '{field}'"
                    )))
                }
            };
            if *flag {
                return Err(FenError::InvalidCastlingRights(format!(
                    "'{c}' repeated in '{field}'"
                )));
            }
            *flag = true;
        }
        Ok(rights)
    }

    fn king_side(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_king_side,
            Side::Black => self.black_king_side,
        }
    }

    fn queen_side(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_queen_side,
            Side::Black => self.black_queen_side,
        }
    }
}

fn home_rank(side: Side) -> Rank {
    match side {
        Side::White => Rank::R1,
        Side::Black => Rank::R8,
    }
}

pub(crate) fn parse(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(FenError::InvalidFieldCount(fields.len()));
    }

    let placement = parse_placement(fields[0])?;
    let side_to_move = match fields[1] {
        "w" => Side::White,
        "b" => Side::Black,
        other => return Err(FenError::InvalidActiveSide(other.to_string())),
    };
    let rights = CastlingRights::parse(fields[2])?;
    if fields.len() == 6 {
        fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
        fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;
    }

    let mut builder = Builder::new();
    for (square, kind, side) in placement {
        builder.set_piece(piece_for(kind, side, square, &rights));
    }
    builder.set_move_maker(side_to_move);
    if let Some(pawn) = en_passant_pawn(fields[3], side_to_move, &builder)? {
        builder.set_en_passant_pawn(pawn);
    }

    let position = builder.build()?;
    tracing::trace!(fen, "loaded position");
    Ok(position)
}

/// Reads the placement field, top rank first.
fn parse_placement(field: &str) -> Result<Vec<(Square, PieceKind, Side)>, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != NUM_TILES_PER_ROW {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut pieces = Vec::new();
    for (row, text) in rows.iter().enumerate() {
        let mut column = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                column += skip as usize;
                continue;
            }
            let (kind, side) = PieceKind::from_fen_char(c).ok_or_else(|| {
                FenError::InvalidPiecePlacement(format!("invalid piece character '{c}'"))
            })?;
            if column >= NUM_TILES_PER_ROW {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank '{text}' covers more than 8 squares"
                )));
            }
            pieces.push((Square::ALL[row * NUM_TILES_PER_ROW + column], kind, side));
            column += 1;
        }
        if column != NUM_TILES_PER_ROW {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank '{text}' covers {column} squares, expected 8"
            )));
        }
    }
    Ok(pieces)
}

/// Builds a piece with the flags a FEN setup implies.
///
/// Pawns are unmoved on their start rank. Kings and rooks are unmoved when
/// the castling field still grants a right that needs them.
fn piece_for(kind: PieceKind, side: Side, square: Square, rights: &CastlingRights) -> Piece {
    let home = |file| Square::new(file, home_rank(side));
    match kind {
        PieceKind::Pawn => {
            Piece::new(kind, side, square).with_first_move(side.is_pawn_start_square(square))
        }
        PieceKind::King if square == home(File::E) => {
            let king_side = rights.king_side(side);
            let queen_side = rights.queen_side(side);
            Piece::king(side, square, king_side, queen_side)
                .with_first_move(king_side || queen_side)
        }
        PieceKind::King => Piece::new(kind, side, square).with_first_move(false),
        PieceKind::Rook => {
            let unmoved = (square == home(File::H) && rights.king_side(side))
                || (square == home(File::A) && rights.queen_side(side));
            Piece::new(kind, side, square).with_first_move(unmoved)
        }
        _ => Piece::new(kind, side, square),
    }
}

/// Maps the en-passant target square to the pawn that just double-stepped
/// past it.
fn en_passant_pawn(
    field: &str,
    side_to_move: Side,
    builder: &Builder,
) -> Result<Option<Piece>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassantSquare(field.to_string());

    let target = Square::from_algebraic(field).ok_or_else(invalid)?;
    let pawn_side = side_to_move.opposite();
    let expected_rank = match pawn_side {
        Side::White => Rank::R3,
        Side::Black => Rank::R6,
    };
    if target.rank() != expected_rank {
        return Err(invalid());
    }

    let pawn_square = target
        .offset(pawn_side.direction() * NUM_TILES_PER_ROW as i8)
        .ok_or_else(invalid)?;
    match builder.piece_at(pawn_square) {
        Some(pawn) if pawn.kind().is_pawn() && pawn.side() == pawn_side => Ok(Some(pawn)),
        _ => Err(invalid()),
    }
}

pub(crate) fn write(position: &Position) -> String {
    let mut fen = String::new();

    for row in 0..NUM_TILES_PER_ROW {
        let mut empty = 0;
        for column in 0..NUM_TILES_PER_ROW {
            match position.tile(Square::ALL[row * NUM_TILES_PER_ROW + column]).piece() {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.kind().to_fen_char(piece.side()));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if row + 1 < NUM_TILES_PER_ROW {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(if position.side_to_move().is_white() { 'w' } else { 'b' });

    fen.push(' ');
    let castling = castling_field(position);
    fen.push_str(if castling.is_empty() { "-" } else { &castling });

    fen.push(' ');
    match position.en_passant_pawn() {
        Some(pawn) => {
            let target = pawn
                .square()
                .offset(pawn.side().opposite_direction() * NUM_TILES_PER_ROW as i8);
            match target {
                Some(square) => fen.push_str(&square.to_algebraic()),
                None => fen.push('-'),
            }
        }
        None => fen.push('-'),
    }

    fen.push_str(" 0 1");
    fen
}

/// A right is written only while the king still holds it and the matching
/// rook stands unmoved in its corner.
fn castling_field(position: &Position) -> String {
    let mut field = String::new();
    for side in Side::ALL {
        let king = position.player(side).king();
        let rook_ready = |file| {
            position
                .tile(Square::new(file, home_rank(side)))
                .piece()
                .is_some_and(|p| p.kind().is_rook() && p.side() == side && p.is_first_move())
        };
        if king.is_king_side_castle_capable() && rook_ready(File::H) {
            field.push(PieceKind::King.to_fen_char(side));
        }
        if king.is_queen_side_castle_capable() && rook_ready(File::A) {
            field.push(PieceKind::Queen.to_fen_char(side));
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_matches_standard() {
        let position = Position::from_fen(STARTPOS).unwrap();
        assert_eq!(position, Position::standard());
        assert_eq!(Position::standard().to_fen(), STARTPOS);
        let king = position.black_player().king();
        assert!(king.is_king_side_castle_capable());
        assert!(king.is_queen_side_castle_capable());
        assert!(king.is_first_move());
    }

    #[test]
    fn clocks_are_optional() {
        let short =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(short, Position::standard());
    }

    #[test]
    fn castling_field_sets_flags() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let white = position.white_player();
        assert!(white.is_king_side_castle_capable());
        assert!(!white.is_queen_side_castle_capable());
        let board = position.board();
        assert!(board.piece_at(Square::H1).unwrap().is_first_move());
        assert!(!board.piece_at(Square::A1).unwrap().is_first_move());
        assert!(board.piece_at(Square::A8).unwrap().is_first_move());
        assert!(!board.piece_at(Square::H8).unwrap().is_first_move());
        assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    }

    #[test]
    fn displaced_king_cannot_castle() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R4K1R w KQ - 0 1").unwrap();
        let king = position.white_player().king();
        assert!(!king.is_king_side_castle_capable());
        assert!(!king.is_first_move());
        assert!(position.to_fen().contains(" w - "));
    }

    #[test]
    fn en_passant_target_maps_to_pawn() {
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPP2PPP/RNBQKBNR b KQkq e3 0 3")
                .unwrap();
        let pawn = position.en_passant_pawn().unwrap();
        assert_eq!(pawn.square(), sq("e4"));
        assert_eq!(pawn.side(), Side::White);
        assert!(position.to_fen().contains(" b KQkq e3 "));
    }

    #[test]
    fn en_passant_target_needs_a_pawn() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - e3 0 1").unwrap_err(),
            FenError::InvalidEnPassantSquare("e3".to_string())
        );
        // Rank 6 targets belong to Black pawns, so White must be to move.
        assert!(matches!(
            Position::from_fen("4k3/8/8/3p4/8/8/8/4K3 b - d6 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert_eq!(
            Position::from_fen("8/8/8 w").unwrap_err(),
            FenError::InvalidFieldCount(2)
        );
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidActiveSide(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 y"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn board_errors_pass_through() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            FenError::Board(BoardError::MissingKing(Side::Black))
        );
        let err = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
        assert_eq!(err.to_string(), "invalid board: Black has no king");
    }
}
