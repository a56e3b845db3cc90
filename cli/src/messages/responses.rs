use std::fmt;

use mate_engine::{Board, Color, Eval, Move, SearchOutcome, Square};

#[derive(Debug)]
pub(crate) enum CommandResponse<'a> {
    Loaded { board: &'a Board },
    Board { board: &'a Board },
    Moves { square: Square, moves: &'a [Move] },
    NoPiece { square: Square },
    Eval { color: Color, eval: Eval },
    Outcome { outcome: &'a SearchOutcome },
    NoPosition,
}

impl fmt::Display for CommandResponse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResponse::Loaded { board } => write!(f, "loaded {}", board.to_fen()),
            CommandResponse::Board { board } => write!(f, "{}fen {}", board, board.to_fen()),
            CommandResponse::Moves { square, moves } if moves.is_empty() => {
                write!(f, "{}: no legal moves", square)
            }
            CommandResponse::Moves { square, moves } => {
                let moves = moves.iter().map(Move::to_string).collect::<Vec<_>>();
                write!(f, "{}: {}", square, moves.join(", "))
            }
            CommandResponse::NoPiece { square } => write!(f, "{}: no piece", square),
            CommandResponse::Eval { color, eval } => {
                write!(f, "eval ({} to move): {}", color, eval)
            }
            CommandResponse::Outcome { outcome } => {
                write!(f, "{}", outcome.to_string().trim_end())
            }
            CommandResponse::NoPosition => {
                write!(f, "no position loaded, use `fen` or `load` first")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mate_engine::Square::*;
    use testresult::TestResult;

    #[test]
    fn test_moves_response() {
        let moves = [Move::new(E2, E3), Move::new(E2, E4)];
        let response = CommandResponse::Moves {
            square: E2,
            moves: &moves,
        };

        assert_eq!(response.to_string(), "E2: E2 -> E3, E2 -> E4");
        assert_eq!(
            CommandResponse::Moves {
                square: E2,
                moves: &[]
            }
            .to_string(),
            "E2: no legal moves"
        );
    }

    #[test]
    fn test_board_response() -> TestResult {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3")?;

        assert_eq!(
            CommandResponse::Board { board: &board }.to_string(),
            "E8 black king\nE1 white king\nfen 4k3/8/8/8/8/8/8/4K3"
        );
        Ok(())
    }
}
