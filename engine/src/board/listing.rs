use std::io::BufRead;
use std::str::FromStr;

use crate::board::{Board, BoardBuilder, BoardError, Square};
use crate::piece::{Color, PieceKind};

impl Board {
    /// Loads a board from lines of `<square> <color> <pieceType>`, e.g. `E1 white king`.
    /// Blank lines are skipped and tokens after the third are ignored. This is the format
    /// `Display` writes.
    pub fn from_listing(reader: impl BufRead) -> Result<Self, BoardError> {
        let mut builder = BoardBuilder::new();

        for line in reader.lines() {
            let line = line.map_err(|e| BoardError::Read(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();

            let square_str = tokens.next().unwrap_or_default();
            let square = Square::from_text(square_str)
                .ok_or_else(|| BoardError::InvalidPosition(square_str.to_string()))?;

            let color_str = tokens.next().unwrap_or_default();
            let color = Color::from_str(color_str)
                .map_err(|_| BoardError::InvalidColor(color_str.to_string()))?;

            let kind_str = tokens.next().unwrap_or_default();
            let kind = PieceKind::from_str(kind_str)
                .map_err(|_| BoardError::InvalidPieceType(kind_str.to_string()))?;

            builder.place(square, color, kind)?;
        }

        builder.build()
    }

    pub fn from_str_listing(listing: &str) -> Result<Self, BoardError> {
        Board::from_listing(listing.as_bytes())
    }
}
