use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::piece::{Color, Piece, PieceKind};

mod fen;
mod listing;
mod square;
mod square_set;

pub use fen::FenParseError;
pub use square::{Direction, Square, DIAGONALS, KING_STEPS, KNIGHT_STEPS, ORTHOGONALS};
pub use square_set::SquareSet;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("position already occupied: {0}")]
    PositionAlreadyOccupied(Square),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid piece type: {0}")]
    InvalidPieceType(String),

    #[error("{0} king does not exist")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    DuplicateKing(Color),

    #[error("kings are neighbours")]
    KingsAdjacent,

    #[error("internal state error: {0}")]
    Inconsistent(String),

    #[error("couldn't read position: {0}")]
    Read(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, " ({})", promotion)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Everything `unmake_move` needs to put the board back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmakeMoveState {
    mve: Move,
    moved: Piece,
    captured: Option<Piece>,
}

impl UnmakeMoveState {
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// 64 cells plus the two king squares. Pieces only change cells through `make_move` and
/// `unmake_move` once the board is built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
    kings: [Square; 2],
}

impl Board {
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square as usize]
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.cells[square as usize].is_none()
    }

    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color != color)
    }

    /// A piece of `color` may land on `square` by capture. Kings are never captured.
    pub fn can_capture(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color != color && piece.kind != PieceKind::King)
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Pieces in row-major board order (rank 8 first).
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        Square::list_white_perspective()
            .into_iter()
            .filter_map(|sq| self.piece_at(sq))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn kings_adjacent(&self) -> bool {
        self.king_square(Color::White)
            .is_adjacent(self.king_square(Color::Black))
    }

    pub fn make_move(&mut self, mve: Move) -> UnmakeMoveState {
        let Some(moved) = self.cells[mve.from as usize].take() else {
            panic!("no piece at {} for move {}", mve.from, mve);
        };
        let captured = self.cells[mve.to as usize].take();

        let landed = if moved.kind == PieceKind::Pawn && mve.to.row() == moved.color.promotion_row() {
            let kind = mve
                .promotion
                .filter(|kind| kind.can_promote_to())
                .unwrap_or(PieceKind::Queen);
            Piece::new(moved.color, kind, mve.to)
        } else {
            moved.moved_to(mve.to)
        };

        if moved.kind == PieceKind::King {
            self.kings[moved.color.index()] = mve.to;
        }
        self.cells[mve.to as usize] = Some(landed);

        UnmakeMoveState {
            mve,
            moved,
            captured,
        }
    }

    pub fn unmake_move(&mut self, state: UnmakeMoveState) {
        let UnmakeMoveState {
            mve,
            moved,
            captured,
        } = state;

        self.cells[mve.to as usize] = captured;
        self.cells[mve.from as usize] = Some(moved);

        if moved.kind == PieceKind::King {
            self.kings[moved.color.index()] = mve.from;
        }
    }

    /// Checks every board invariant. Loaders run this before handing out a board; search runs it
    /// after each move in debug builds.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::iter() {
            let mut kings = self
                .pieces_of(color)
                .filter(|piece| piece.kind == PieceKind::King);
            match (kings.next(), kings.next()) {
                (None, _) => return Err(BoardError::MissingKing(color)),
                (Some(_), Some(_)) => return Err(BoardError::DuplicateKing(color)),
                (Some(king), None) if king.square != self.king_square(color) => {
                    return Err(BoardError::Inconsistent(format!(
                        "{} king cached at {} but found at {}",
                        color,
                        self.king_square(color),
                        king.square
                    )))
                }
                _ => (),
            }
        }

        for sq in Square::iter() {
            if let Some(piece) = self.piece_at(sq) {
                if piece.square != sq {
                    return Err(BoardError::Inconsistent(format!(
                        "cell {} holds piece recorded at {}",
                        sq, piece.square
                    )));
                }
            }
        }

        if self.kings_adjacent() {
            return Err(BoardError::KingsAdjacent);
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in self.pieces() {
            writeln!(f, "{} {} {}", piece.square, piece.color, piece.kind)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);
        for (idx, square) in Square::list_white_perspective().into_iter().enumerate() {
            board_str.push(self.piece_at(square).map_or('.', Piece::fen_char));
            if (idx + 1) % 8 == 0 && idx != 63 {
                board_str.push('\n');
            }
        }
        write!(f, "{}", board_str)
    }
}

/// Collects pieces one at a time, then checks the kings when built.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    cells: [Option<Piece>; 64],
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self { cells: [None; 64] }
    }
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, square: Square, color: Color, kind: PieceKind) -> Result<&mut Self, BoardError> {
        let cell = &mut self.cells[square as usize];
        if cell.is_some() {
            return Err(BoardError::PositionAlreadyOccupied(square));
        }
        *cell = Some(Piece::new(color, kind, square));
        Ok(self)
    }

    pub fn build(self) -> Result<Board, BoardError> {
        let mut kings = [None, None];
        for piece in self.cells.iter().flatten() {
            if piece.kind == PieceKind::King {
                let slot = &mut kings[piece.color.index()];
                if slot.is_some() {
                    return Err(BoardError::DuplicateKing(piece.color));
                }
                *slot = Some(piece.square);
            }
        }

        let [Some(white_king), Some(black_king)] = kings else {
            let color = if kings[Color::White.index()].is_none() {
                Color::White
            } else {
                Color::Black
            };
            return Err(BoardError::MissingKing(color));
        };

        let board = Board {
            cells: self.cells,
            kings: [white_king, black_king],
        };
        board.validate()?;
        Ok(board)
    }
}
