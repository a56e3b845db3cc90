use crate::board::{Board, Move, Square};
use crate::piece::Color;

use super::{CheckStatus, PieceMoves};

pub trait GenerateMoves {
    fn gen_moves(&self, board: &mut Board, color: Color) -> Vec<Move>;
    /// Moves of the piece on `square`, one per promotion choice.
    fn gen_moves_from(&self, board: &mut Board, square: Square) -> PieceMoves;
    fn check_status(&self, board: &Board, color: Color) -> CheckStatus;
}
