//! Board geometry lookup tables.
//!
//! Tiles are numbered row-major from Black's back rank:
//!
//! ```text
//!  0  1  2  3  4  5  6  7     a8 .. h8
//!  8  9 10 11 12 13 14 15
//! ..
//! 56 57 58 59 60 61 62 63     a1 .. h1
//! ```
//!
//! The column tables exist only so move generators can reject offsets that
//! would wrap around the left or right edge of the board.

pub const NUM_TILES: usize = 64;
pub const NUM_TILES_PER_ROW: usize = 8;

pub const FIRST_COLUMN: [bool; NUM_TILES] = column(0);
pub const SECOND_COLUMN: [bool; NUM_TILES] = column(1);
pub const SEVENTH_COLUMN: [bool; NUM_TILES] = column(6);
pub const EIGHTH_COLUMN: [bool; NUM_TILES] = column(7);

pub const EIGHTH_RANK: [bool; NUM_TILES] = row(0);
pub const SEVENTH_RANK: [bool; NUM_TILES] = row(1);
pub const SIXTH_RANK: [bool; NUM_TILES] = row(2);
pub const FIFTH_RANK: [bool; NUM_TILES] = row(3);
pub const FOURTH_RANK: [bool; NUM_TILES] = row(4);
pub const THIRD_RANK: [bool; NUM_TILES] = row(5);
pub const SECOND_RANK: [bool; NUM_TILES] = row(6);
pub const FIRST_RANK: [bool; NUM_TILES] = row(7);

const fn column(file: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut i = file;
    while i < NUM_TILES {
        table[i] = true;
        i += NUM_TILES_PER_ROW;
    }
    table
}

const fn row(row: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut i = row * NUM_TILES_PER_ROW;
    while i < (row + 1) * NUM_TILES_PER_ROW {
        table[i] = true;
        i += 1;
    }
    table
}

/// Returns true if `index` names a tile on the board.
#[inline]
pub const fn is_valid_index(index: i16) -> bool {
    index >= 0 && index < NUM_TILES as i16
}
