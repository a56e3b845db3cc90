use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::board::{BoardError, Direction, Square, DIAGONALS, KING_STEPS, KNIGHT_STEPS, ORTHOGONALS};

#[derive(Debug, PartialEq, Eq, EnumIter, EnumString, Clone, Copy, Display, Hash, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for white, -1 for black. White maximizes.
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Row delta of a pawn push. White pawns walk towards row 0.
    pub fn pawn_forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// How a piece kind moves, apart from pawns which have their own push and capture rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Steps(&'static [Direction]),
    Rays(&'static [Direction]),
    Pawn,
}

const QUEEN_RAYS: [Direction; 8] = KING_STEPS;

#[derive(Debug, PartialEq, Eq, EnumIter, EnumString, Clone, Copy, Display, Hash, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Promotion choices, most valuable first.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 1,
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            PieceKind::Pawn => Capability::Pawn,
            PieceKind::Knight => Capability::Steps(&KNIGHT_STEPS),
            PieceKind::King => Capability::Steps(&KING_STEPS),
            PieceKind::Bishop => Capability::Rays(&DIAGONALS),
            PieceKind::Rook => Capability::Rays(&ORTHOGONALS),
            PieceKind::Queen => Capability::Rays(&QUEEN_RAYS),
        }
    }

    /// Only sliders give checks that another piece can step in front of.
    pub fn is_check_blockable(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Whether this kind slides along `dir` (in either sense).
    pub fn slides_along(self, dir: Direction) -> bool {
        match self {
            PieceKind::Bishop => dir.is_diagonal(),
            PieceKind::Rook => dir.is_orthogonal(),
            PieceKind::Queen => dir.is_line(),
            _ => false,
        }
    }

    pub fn can_promote_to(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }
}

impl From<PieceKind> for char {
    fn from(kind: PieceKind) -> char {
        match kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = BoardError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'p' => Ok(PieceKind::Pawn),
            'n' => Ok(PieceKind::Knight),
            'b' => Ok(PieceKind::Bishop),
            'r' => Ok(PieceKind::Rook),
            'q' => Ok(PieceKind::Queen),
            'k' => Ok(PieceKind::King),
            _ => Err(BoardError::InvalidPieceType(value.to_string())),
        }
    }
}

/// A piece standing on the board. The square always matches the cell holding it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Deserialize, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
        }
    }

    pub(crate) fn moved_to(self, square: Square) -> Self {
        Self { square, ..self }
    }

    /// FEN letter: upper case for white.
    pub fn fen_char(self) -> char {
        let ch: char = self.kind.into();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}
