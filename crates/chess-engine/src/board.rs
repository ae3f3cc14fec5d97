//! Immutable positions and the builder that stages them.

use std::fmt;

use chess_core::geometry::{NUM_TILES, NUM_TILES_PER_ROW};
use chess_core::{PieceKind, Side, Square};

use crate::fen::{self, FenError};
use crate::movegen;
use crate::{BoardError, Move, Piece, Player, PlayerState, Tile};

/// The occupancy of the 64 tiles plus the pawn that just double-stepped.
///
/// This is the part of a position move generators look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; NUM_TILES],
    en_passant_pawn: Option<Piece>,
}

impl Board {
    #[inline]
    pub fn tile(&self, square: Square) -> Tile {
        self.tiles[square.index() as usize]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.tile(square).piece()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.tile(square).is_occupied()
    }

    /// The pawn that double-stepped on the previous move, if any.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    pub(crate) fn tiles(&self) -> &[Tile; NUM_TILES] {
        &self.tiles
    }
}

/// A complete, immutable chess position.
///
/// Holds the board, each side's active pieces, the derived per-side state
/// (legal moves, check) and whose turn it is. Everything is computed once
/// by [`Builder::build`]; playing a move produces a new `Position`.
///
/// Two positions are equal when their tiles, en-passant pawn and side to
/// move agree.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_player: PlayerState,
    black_player: PlayerState,
    side_to_move: Side,
}

impl Position {
    /// The standard starting position, White to move.
    pub fn standard() -> Self {
        let mut builder = Builder::new();
        for side in Side::ALL {
            let back = side.back_rank_row() as usize * NUM_TILES_PER_ROW;
            let pawn_row = (side.back_rank_row() as i8 + side.direction()) as usize;
            let pawns = pawn_row * NUM_TILES_PER_ROW;
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let square = Square::ALL[back + file];
                let piece = if kind.is_king() {
                    Piece::king(side, square, true, true)
                } else {
                    Piece::new(*kind, side, square)
                };
                builder.set_piece(piece);
                builder.set_piece(Piece::new(PieceKind::Pawn, side, Square::ALL[pawns + file]));
            }
        }
        builder
            .build()
            .expect("standard position has exactly one king per side")
    }

    /// Parses a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        fen::parse(fen)
    }

    /// Writes this position as FEN. Clocks are always `0 1`.
    pub fn to_fen(&self) -> String {
        fen::write(self)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn tile(&self, square: Square) -> Tile {
        self.board.tile(square)
    }

    /// Pieces of `side` still on the board, in tile order.
    pub fn active_pieces(&self, side: Side) -> &[Piece] {
        match side {
            Side::White => &self.white_pieces,
            Side::Black => &self.black_pieces,
        }
    }

    #[inline]
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.board.en_passant_pawn()
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.side_to_move)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Side::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Side::Black)
    }

    pub fn player(&self, side: Side) -> Player<'_> {
        let state = match side {
            Side::White => &self.white_player,
            Side::Black => &self.black_player,
        };
        Player::new(self, state)
    }

    /// White's legal moves followed by Black's.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.white_player
            .legal_moves()
            .iter()
            .chain(self.black_player.legal_moves())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move && self.board == other.board
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tile) in self.board.tiles.iter().enumerate() {
            write!(f, "{:>3}", tile.to_string())?;
            if (i + 1) % NUM_TILES_PER_ROW == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

const BACK_RANK: [PieceKind; NUM_TILES_PER_ROW] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Mutable staging area for a [`Position`].
///
/// ```
/// use chess_core::{PieceKind, Side, Square};
/// use chess_engine::{Builder, Piece};
///
/// let mut builder = Builder::new();
/// builder
///     .set_piece(Piece::king(Side::White, Square::E1, false, false))
///     .set_piece(Piece::king(Side::Black, Square::E8, false, false))
///     .set_piece(Piece::new(PieceKind::Rook, Side::White, Square::A1));
/// let position = builder.build().unwrap();
/// assert_eq!(position.active_pieces(Side::White).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    config: [Option<Piece>; NUM_TILES],
    next_move_maker: Side,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// An empty board with White to move.
    pub fn new() -> Self {
        Builder {
            config: [None; NUM_TILES],
            next_move_maker: Side::White,
            en_passant_pawn: None,
        }
    }

    /// Places `piece` on its own square, replacing whatever was there.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.config[piece.square().index() as usize] = Some(piece);
        self
    }

    pub fn set_move_maker(&mut self, side: Side) -> &mut Self {
        self.next_move_maker = side;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// The piece staged on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.config[square.index() as usize]
    }

    /// Freezes the staged pieces into a [`Position`].
    ///
    /// # Errors
    ///
    /// Fails unless each side has exactly one king.
    pub fn build(self) -> Result<Position, BoardError> {
        let tiles = std::array::from_fn(|i| Tile::new(Square::ALL[i], self.config[i]));
        let board = Board {
            tiles,
            en_passant_pawn: self.en_passant_pawn,
        };

        let white_pieces = active_pieces(&board, Side::White);
        let black_pieces = active_pieces(&board, Side::Black);
        let white_king = find_king(&white_pieces, Side::White)?;
        let black_king = find_king(&black_pieces, Side::Black)?;

        let white_moves = movegen::pseudo_legal_moves(&board, &white_pieces);
        let black_moves = movegen::pseudo_legal_moves(&board, &black_pieces);

        let white_player =
            PlayerState::new(&board, white_king, &white_moves, &black_moves, &black_pieces);
        let black_player =
            PlayerState::new(&board, black_king, &black_moves, &white_moves, &white_pieces);

        tracing::trace!(
            white = white_pieces.len(),
            black = black_pieces.len(),
            to_move = %self.next_move_maker,
            "built position"
        );

        Ok(Position {
            board,
            white_pieces,
            black_pieces,
            white_player,
            black_player,
            side_to_move: self.next_move_maker,
        })
    }
}

fn active_pieces(board: &Board, side: Side) -> Vec<Piece> {
    board
        .tiles()
        .iter()
        .filter_map(Tile::piece)
        .filter(|piece| piece.side() == side)
        .collect()
}

fn find_king(pieces: &[Piece], side: Side) -> Result<Piece, BoardError> {
    let mut kings = pieces.iter().filter(|piece| piece.kind().is_king());
    match (kings.next(), kings.count()) {
        (Some(king), 0) => Ok(*king),
        (None, _) => {
            tracing::debug!(%side, "rejecting board without a king");
            Err(BoardError::MissingKing(side))
        }
        (Some(_), extra) => {
            tracing::debug!(%side, count = extra + 1, "rejecting board with several kings");
            Err(BoardError::MultipleKings {
                side,
                count: extra + 1,
            })
        }
    }
}
