use crate::board::{Board, BoardBuilder, BoardError, Square};
use crate::piece::{Color, PieceKind};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FenParseError {
    #[error("invalid FEN format: {0}")]
    InvalidFenFormat(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl Board {
    /// Reads the piece placement field of a FEN string. Anything after the first space is
    /// ignored: side to move, castling and en passant have no meaning here.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let placement = fen.split(' ').next().unwrap_or_default();
        let ranks = placement.split('/').collect::<Vec<&str>>();

        if ranks.len() != 8 {
            return Err(FenParseError::InvalidFenFormat(format!(
                "want 8 ranks, got {} in {}",
                ranks.len(),
                placement
            )));
        }

        let mut builder = BoardBuilder::new();
        for (row, rank) in ranks.into_iter().enumerate() {
            let mut col: u32 = 0;
            for ch in rank.chars() {
                if let Some(digit) = ch.to_digit(10) {
                    if digit == 0 || digit > 8 {
                        return Err(FenParseError::InvalidFenFormat(format!(
                            "bad empty square count {} in rank {}",
                            ch, rank
                        )));
                    }
                    col += digit;
                    continue;
                }

                let kind = PieceKind::try_from(ch.to_ascii_lowercase())?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square = Square::from_row_col(row as i8, col as i8).ok_or_else(|| {
                    FenParseError::InvalidFenFormat(format!("rank {} is longer than 8", rank))
                })?;
                builder.place(square, color, kind)?;
                col += 1;
            }

            if col != 8 {
                return Err(FenParseError::InvalidFenFormat(format!(
                    "rank {} covers {} squares, want 8",
                    rank, col
                )));
            }
        }

        Ok(builder.build()?)
    }

    pub fn to_fen(&self) -> String {
        let mut pieces = String::with_capacity(64 + 7);
        let mut curr_empty_count = 0;

        for (idx, sq) in Square::list_white_perspective().into_iter().enumerate() {
            if let Some(piece) = self.piece_at(sq) {
                if curr_empty_count != 0 {
                    pieces += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                pieces.push(piece.fen_char());
            } else {
                curr_empty_count += 1;
            }
            if (idx + 1) % 8 == 0 {
                if curr_empty_count != 0 {
                    pieces += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                if idx != 63 {
                    pieces.push('/');
                }
            }
        }
        pieces
    }
}
