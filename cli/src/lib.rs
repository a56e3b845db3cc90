mod messages;
mod session;
mod state;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use mate_engine::Board;

pub use messages::CommandParseError;
pub use session::Session;

/// Reads a board from a file of `<square> <color> <pieceType>` lines.
pub fn read_listing_file(path: &Path) -> Result<Board> {
    let file = File::open(path).with_context(|| format!("Couldn't open {:?}", path))?;
    Board::from_listing(BufReader::new(file))
        .with_context(|| format!("Couldn't read position from {:?}", path))
}
