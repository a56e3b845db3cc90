use test_case::test_case;
use testresult::TestResult;

use mate_engine::Square::*;
use mate_engine::{gen_moves, legal_moves_from, Board, Color, Move, PieceKind};

fn count_leaves(board: &mut Board, color: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut total = 0;
    for mve in gen_moves(board, color) {
        let state = board.make_move(mve);
        total += count_leaves(board, color.opposite(), depth - 1);
        board.unmake_move(state);
    }
    total
}

// Reference node counts from positions where castling and en passant can't occur yet.
#[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White, 1, 20 ; "start 1")]
#[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White, 2, 400 ; "start 2")]
#[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White, 3, 8902 ; "start 3")]
#[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White, 1, 14 ; "pinned pawn 1")]
#[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White, 2, 191 ; "pinned pawn 2")]
fn test_leaf_counts(fen: &str, color: Color, depth: usize, want: u64) -> TestResult {
    let mut board = Board::from_fen(fen)?;
    let before = board.clone();

    assert_eq!(count_leaves(&mut board, color, depth), want);
    assert_eq!(board, before);
    Ok(())
}

#[test]
fn test_promotion_capture_round_trip() -> TestResult {
    let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3")?;
    let before = board.clone();

    let moves = legal_moves_from(&mut board, A7);
    assert_eq!(moves.len(), 8);

    for mve in moves {
        let state = board.make_move(mve);
        let promoted = board.piece_at(mve.to).map(|piece| piece.kind);
        assert_eq!(promoted, mve.promotion);
        assert_eq!(board.piece_at(A7), None);
        board.unmake_move(state);
        assert_eq!(board, before);
    }

    let state = board.make_move(Move::with_promotion(A7, B8, PieceKind::Knight));
    assert_eq!(state.captured().map(|piece| piece.kind), Some(PieceKind::Knight));
    board.unmake_move(state);
    assert_eq!(board, before);
    Ok(())
}
