//! Board cells.

use std::fmt;

use chess_core::geometry::NUM_TILES;
use chess_core::Square;

use crate::Piece;

/// One of the 64 cells of a board: empty, or holding exactly one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty(Square),
    Occupied(Square, Piece),
}

/// Every possible empty tile, built once and shared by all positions.
static EMPTY_TILES: [Tile; NUM_TILES] = {
    let mut tiles = [Tile::Empty(Square::A8); NUM_TILES];
    let mut i = 0;
    while i < NUM_TILES {
        tiles[i] = Tile::Empty(Square::ALL[i]);
        i += 1;
    }
    tiles
};

impl Tile {
    /// Creates the tile for `square`, reusing the shared empty tile when
    /// there is no piece.
    #[inline]
    pub fn new(square: Square, piece: Option<Piece>) -> Self {
        match piece {
            Some(piece) => Tile::Occupied(square, piece),
            None => Tile::empty(square),
        }
    }

    #[inline]
    pub fn empty(square: Square) -> Self {
        EMPTY_TILES[square.index() as usize]
    }

    #[inline]
    pub const fn square(&self) -> Square {
        match self {
            Tile::Empty(square) | Tile::Occupied(square, _) => *square,
        }
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied(..))
    }

    /// Returns the piece on this tile, if any.
    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        match self {
            Tile::Empty(_) => None,
            Tile::Occupied(_, piece) => Some(*piece),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Empty(_) => write!(f, "-"),
            Tile::Occupied(_, piece) => write!(f, "{}", piece),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{PieceKind, Side};

    #[test]
    fn empty_tiles_are_shared_values() {
        let tile = Tile::new(Square::E1, None);
        assert_eq!(tile, Tile::Empty(Square::E1));
        assert_eq!(tile.square(), Square::E1);
        assert!(!tile.is_occupied());
        assert_eq!(tile.piece(), None);
        assert_eq!(tile.to_string(), "-");
    }

    #[test]
    fn occupied_tile_holds_piece() {
        let king = Piece::king(Side::Black, Square::E8, true, true);
        let tile = Tile::new(Square::E8, Some(king));
        assert!(tile.is_occupied());
        assert_eq!(tile.piece(), Some(king));
        assert_eq!(tile.square(), Square::E8);
        assert_eq!(tile.to_string(), "k");
    }

    #[test]
    fn every_index_has_an_empty_tile() {
        for square in Square::all() {
            assert_eq!(Tile::empty(square).square(), square);
        }
        let pawn = Piece::new(PieceKind::Pawn, Side::White, Square::A1);
        assert_ne!(Tile::empty(Square::A1), Tile::new(Square::A1, Some(pawn)));
    }
}
