use std::iter;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

/// Squares are numbered from A1 so that `square as u8 / 8` is the rank index. Rows count the
/// other way: row 0 is rank 8, row 7 is rank 1.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, FromRepr, Display, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub const fn row(self) -> u8 {
        7 - (self as u8 / 8)
    }

    pub const fn col(self) -> u8 {
        self as u8 % 8
    }

    pub fn from_row_col(row: i8, col: i8) -> Option<Square> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        Square::from_repr(((7 - row) * 8 + col) as u8)
    }

    /// Parses `<file><rank>` text such as `E4`. Lower case files are accepted.
    pub fn from_text(text: &str) -> Option<Square> {
        let mut chars = text.chars();
        let (file, rank) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let file = file.to_ascii_uppercase();
        if !('A'..='H').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as i8 - 'A' as i8;
        let row = 8 - (rank as i8 - '0' as i8);
        Square::from_row_col(row, col)
    }

    pub fn offset(self, dir: Direction) -> Option<Square> {
        Square::from_row_col(
            self.row() as i8 + dir.d_row,
            self.col() as i8 + dir.d_col,
        )
    }

    /// Squares reached by stepping repeatedly in `dir`, stopping at the board edge.
    pub fn ray(self, dir: Direction) -> impl Iterator<Item = Square> {
        iter::successors(self.offset(dir), move |sq| sq.offset(dir))
    }

    pub fn manhattan_distance(self, other: Square) -> i32 {
        i32::from(self.row().abs_diff(other.row())) + i32::from(self.col().abs_diff(other.col()))
    }

    pub fn is_adjacent(self, other: Square) -> bool {
        self != other && self.row().abs_diff(other.row()) <= 1 && self.col().abs_diff(other.col()) <= 1
    }

    /// Board order used for listing and rendering: row 0 first, file A first.
    #[rustfmt::skip]
    pub const fn list_white_perspective() -> [Square; 64] {
        [
            Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
            Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
            Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
            Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
            Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
            Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
            Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
            Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
        ]
    }
}

/// Displacement between two squares, in rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    pub fn between(from: Square, to: Square) -> Self {
        Self {
            d_row: to.row() as i8 - from.row() as i8,
            d_col: to.col() as i8 - from.col() as i8,
        }
    }

    /// Unit step with the same heading. Only meaningful for line directions.
    pub fn normalized(self) -> Self {
        Self {
            d_row: self.d_row.signum(),
            d_col: self.d_col.signum(),
        }
    }

    pub fn is_orthogonal(self) -> bool {
        (self.d_row == 0) != (self.d_col == 0)
    }

    pub fn is_diagonal(self) -> bool {
        self.d_row != 0 && self.d_row.abs() == self.d_col.abs()
    }

    pub fn is_knight_shaped(self) -> bool {
        matches!(
            (self.d_row.abs(), self.d_col.abs()),
            (1, 2) | (2, 1)
        )
    }

    /// Whether two squares this far apart can share a rank, file or diagonal.
    pub fn is_line(self) -> bool {
        self.is_orthogonal() || self.is_diagonal()
    }
}

pub const ORTHOGONALS: [Direction; 4] = [
    Direction::new(-1, 0),
    Direction::new(1, 0),
    Direction::new(0, -1),
    Direction::new(0, 1),
];

pub const DIAGONALS: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KING_STEPS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(1, 0),
    Direction::new(0, -1),
    Direction::new(0, 1),
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KNIGHT_STEPS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
];
