pub mod board;
pub mod evaluation;
pub mod move_gen;
pub mod piece;
pub mod search;

pub use board::{
    Board, BoardBuilder, BoardError, Direction, FenParseError, Move, Square, SquareSet,
    UnmakeMoveState,
};
pub use evaluation::{Eval, EvaluatePosition, PositionEvaluator, POSITION_EVALUATOR};
pub use move_gen::{
    check_status, gen_moves, gives_check, legal_destinations, legal_moves_from, CheckStatus,
    GenerateMoves, MoveGen, MOVE_GEN,
};
pub use piece::{Color, Piece, PieceKind};
pub use search::{find_checkmate, PlyStats, SearchError, SearchOutcome, SearchParams, SearchStats};
