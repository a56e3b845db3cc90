mod check;
mod legal;
mod traits;

use crate::board::{Board, Move, Square};
use crate::piece::Color;

pub use self::check::{
    attacked_squares, blocked_checker, check_status, gives_check, x_ray_attacker, CheckStatus,
};
pub use self::legal::{gen_moves, legal_destinations, legal_moves_from, PieceMoves};
pub use self::traits::GenerateMoves;

#[derive(Clone, Copy, Debug)]
pub struct MoveGen;

impl GenerateMoves for MoveGen {
    fn gen_moves(&self, board: &mut Board, color: Color) -> Vec<Move> {
        legal::gen_moves(board, color)
    }

    fn gen_moves_from(&self, board: &mut Board, square: Square) -> PieceMoves {
        legal::legal_moves_from(board, square)
    }

    fn check_status(&self, board: &Board, color: Color) -> CheckStatus {
        check::check_status(board, color)
    }
}

pub static MOVE_GEN: MoveGen = MoveGen {};
