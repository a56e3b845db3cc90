use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::move_gen::GenerateMoves;
use crate::piece::{Color, Piece};

/// Score from white's point of view. The two extremes mean a forced mate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Eval(pub i32);

impl Eval {
    pub const WHITE_MATES: Eval = Eval(i32::MAX);
    pub const BLACK_MATES: Eval = Eval(i32::MIN);
    pub const DRAW: Eval = Eval(0);

    /// The score when `color` delivers mate.
    pub fn mate_by(color: Color) -> Eval {
        match color {
            Color::White => Eval::WHITE_MATES,
            Color::Black => Eval::BLACK_MATES,
        }
    }

    /// The score when `color` is mated.
    pub fn mated(color: Color) -> Eval {
        Eval::mate_by(color.opposite())
    }

    pub fn is_mate(self) -> bool {
        self == Eval::WHITE_MATES || self == Eval::BLACK_MATES
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Eval::WHITE_MATES => Some(Color::White),
            Eval::BLACK_MATES => Some(Color::Black),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Eval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "mate by {}", color),
            None => write!(f, "{:+}", self.0),
        }
    }
}

pub trait EvaluatePosition {
    fn evaluate(&self, board: &mut Board, to_move: Color, move_gen: impl GenerateMoves + Copy) -> Eval;
}

#[derive(Clone, Copy, Debug)]
pub struct PositionEvaluator;

impl EvaluatePosition for PositionEvaluator {
    /// Material plus legal move count for every piece, signed by color, plus one point of tempo
    /// for the side to move. Each promotion choice counts as its own move.
    fn evaluate(&self, board: &mut Board, to_move: Color, move_gen: impl GenerateMoves + Copy) -> Eval {
        let pieces: ArrayVec<Piece, 64> = board.pieces().collect();
        let mut eval = 0;

        for piece in pieces {
            let mobility = move_gen.gen_moves_from(board, piece.square).len() as i32;
            eval += piece.color.sign() * (piece.kind.value() + mobility);
        }

        Eval(eval + to_move.sign())
    }
}

pub static POSITION_EVALUATOR: PositionEvaluator = PositionEvaluator {};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_gen::MOVE_GEN;
    use test_case::test_case;
    use testresult::TestResult;

    #[test_case(Color::White, Eval(1) ; "white to move")]
    #[test_case(Color::Black, Eval(-1) ; "black to move")]
    fn test_start_position_is_tempo(to_move: Color, want: Eval) -> TestResult {
        let mut board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")?;
        assert_eq!(POSITION_EVALUATOR.evaluate(&mut board, to_move, MOVE_GEN), want);
        Ok(())
    }

    #[test]
    fn test_material_and_mobility() -> TestResult {
        // White: king A1 (value 1, 3 moves), rook H1 (value 5, 6 up the file + 6 along the
        // rank). Black: king H8 (value 1, G8 and G7, H7 is on the rook's file).
        let mut board = Board::from_fen("7k/8/8/8/8/8/8/K6R")?;
        let want = (1 + 3) + (5 + 12) - (1 + 2) + 1;
        assert_eq!(POSITION_EVALUATOR.evaluate(&mut board, Color::White, MOVE_GEN), Eval(want));
        Ok(())
    }

    #[test]
    fn test_promotion_choices_count_as_separate_moves() -> TestResult {
        // White: king E1 (value 1, 5 moves), pawn B7 (value 1, four promotions on B8).
        // Black: king E8 (value 1, 5 moves).
        let mut board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3")?;
        let want = (1 + 5) + (1 + 4) - (1 + 5) + 1;
        assert_eq!(POSITION_EVALUATOR.evaluate(&mut board, Color::White, MOVE_GEN), Eval(want));
        Ok(())
    }

    #[test]
    fn test_mate_sentinels() {
        assert_eq!(Eval::mated(Color::White), Eval::BLACK_MATES);
        assert_eq!(Eval::mate_by(Color::White), Eval::WHITE_MATES);
        assert_eq!(Eval::WHITE_MATES.winner(), Some(Color::White));
        assert!(Eval::BLACK_MATES.is_mate());
        assert!(!Eval(12).is_mate());
        assert_eq!(Eval::BLACK_MATES.to_string(), "mate by black");
        assert_eq!(Eval(-3).to_string(), "-3");
    }
}
