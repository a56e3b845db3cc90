use arrayvec::ArrayVec;

use super::check::{check_status, x_ray_attacker, CheckStatus};
use crate::board::{Board, Direction, Move, Square, SquareSet, KING_STEPS};
use crate::piece::{Capability, Color, Piece, PieceKind, PROMOTION_KINDS};

/// Moves of a single piece. A queen tops out at 27, promotions at 3 squares x 4 kinds.
pub type PieceMoves = ArrayVec<Move, 28>;

/// Legal destinations of the piece on `square`, accounting for pins and checks. Empty when the
/// square is empty.
pub fn legal_destinations(board: &mut Board, square: Square) -> SquareSet {
    let Some(piece) = board.piece_at(square) else {
        return SquareSet::empty();
    };
    let status = check_status(board, piece.color);
    destinations(board, piece, &status)
}

pub fn legal_moves_from(board: &mut Board, square: Square) -> PieceMoves {
    let Some(piece) = board.piece_at(square) else {
        return PieceMoves::new();
    };
    let status = check_status(board, piece.color);
    expand_promotions(piece, destinations(board, piece, &status))
}

/// Every legal move of `color`, pieces in board order.
pub fn gen_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let status = check_status(board, color);
    let pieces: ArrayVec<Piece, 64> = board.pieces_of(color).collect();

    let mut moves = Vec::with_capacity(64);
    for piece in pieces {
        moves.extend(expand_promotions(piece, destinations(board, piece, &status)));
    }
    moves
}

fn destinations(board: &mut Board, piece: Piece, status: &CheckStatus) -> SquareSet {
    if piece.kind == PieceKind::King {
        return king_destinations(board, piece);
    }
    // Only the king can answer two checks at once.
    if status.is_double_check() {
        return SquareSet::empty();
    }

    let king = board.king_square(piece.color);
    let mut dests = raw_destinations(board, piece);
    if let Some(pinner) = x_ray_attacker(board, piece.square, piece.color) {
        dests &= SquareSet::between(king, pinner) | pinner;
    }
    dests & status.response_mask(king)
}

/// Destinations from the piece's movement rules alone, ignoring its own king's safety.
pub(crate) fn raw_destinations(board: &Board, piece: Piece) -> SquareSet {
    let mut dests = SquareSet::empty();
    let open = |sq: Square| board.is_empty_at(sq) || board.can_capture(sq, piece.color);

    match piece.kind.capability() {
        Capability::Steps(steps) => {
            for &dir in steps {
                if let Some(sq) = piece.square.offset(dir).filter(|&sq| open(sq)) {
                    dests.insert(sq);
                }
            }
        }
        Capability::Rays(rays) => {
            for &dir in rays {
                for sq in piece.square.ray(dir) {
                    if board.is_empty_at(sq) {
                        dests.insert(sq);
                        continue;
                    }
                    if board.can_capture(sq, piece.color) {
                        dests.insert(sq);
                    }
                    break;
                }
            }
        }
        Capability::Pawn => dests = pawn_destinations(board, piece),
    }
    dests
}

fn pawn_destinations(board: &Board, pawn: Piece) -> SquareSet {
    let mut dests = SquareSet::empty();
    let forward = pawn.color.pawn_forward();

    if let Some(one) = pawn.square.offset(Direction::new(forward, 0)) {
        if board.is_empty_at(one) {
            dests.insert(one);
            if pawn.square.row() == pawn.color.pawn_start_row() {
                if let Some(two) = one.offset(Direction::new(forward, 0)) {
                    if board.is_empty_at(two) {
                        dests.insert(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(sq) = pawn.square.offset(Direction::new(forward, d_col)) {
            if board.can_capture(sq, pawn.color) {
                dests.insert(sq);
            }
        }
    }
    dests
}

/// King steps that are free or capturable, not next to the other king, and not attacked once the
/// king stands there.
fn king_destinations(board: &mut Board, king: Piece) -> SquareSet {
    let enemy_king = board.king_square(king.color.opposite());
    let mut dests = SquareSet::empty();

    for dir in KING_STEPS {
        let Some(to) = king.square.offset(dir) else {
            continue;
        };
        if !(board.is_empty_at(to) || board.can_capture(to, king.color)) || to.is_adjacent(enemy_king) {
            continue;
        }

        let state = board.make_move(Move::new(king.square, to));
        let safe = !check_status(board, king.color).in_check();
        board.unmake_move(state);

        if safe {
            dests.insert(to);
        }
    }
    dests
}

fn expand_promotions(piece: Piece, dests: SquareSet) -> PieceMoves {
    let mut moves = PieceMoves::new();
    for to in dests {
        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            for kind in PROMOTION_KINDS {
                moves.push(Move::with_promotion(piece.square, to, kind));
            }
        } else {
            moves.push(Move::new(piece.square, to));
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square::*;
    use test_case::test_case;
    use testresult::TestResult;

    #[test]
    fn test_start_position_move_count() -> TestResult {
        let mut board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")?;
        assert_eq!(gen_moves(&mut board, Color::White).len(), 20);
        assert_eq!(gen_moves(&mut board, Color::Black).len(), 20);
        Ok(())
    }

    #[test_case("4k3/4r3/8/8/8/8/4R3/4K3", E2, &[E3, E4, E5, E6, E7] ; "rook pinned on file")]
    #[test_case("4k3/4r3/8/8/8/8/4B3/4K3", E2, &[] ; "bishop pinned on file")]
    #[test_case("4k3/8/8/8/8/2b5/3N4/4K3", D2, &[] ; "knight pinned on diagonal")]
    #[test_case("4k3/8/8/8/8/2b5/3Q4/4K3", D2, &[C3] ; "queen pinned on diagonal")]
    fn test_pinned_piece(fen: &str, square: Square, want: &[Square]) -> TestResult {
        let mut board = Board::from_fen(fen)?;
        assert_eq!(legal_destinations(&mut board, square), SquareSet::from_squares(want));
        Ok(())
    }

    #[test]
    fn test_double_check_only_king_moves() -> TestResult {
        let mut board = Board::from_fen("4k3/8/3N4/q7/8/8/8/4R1K1")?;

        assert!(legal_destinations(&mut board, A5).is_empty());
        let moves = gen_moves(&mut board, Color::Black);
        assert!(moves.iter().all(|mve| mve.from == E8));
        assert_eq!(
            moves.iter().map(|mve| mve.to).collect::<SquareSet>(),
            SquareSet::from_squares(&[D8, F8, D7])
        );
        Ok(())
    }

    #[test]
    fn test_single_check_block_or_capture() -> TestResult {
        let mut board = Board::from_fen("4k3/8/8/r7/8/8/8/4R1K1")?;
        assert_eq!(legal_destinations(&mut board, A5), SquareSet::from_square(E5));

        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/r3R1K1")?;
        assert_eq!(legal_destinations(&mut board, A1), SquareSet::from_squares(&[E1]));
        Ok(())
    }

    #[test]
    fn test_king_cannot_step_into_check_or_next_to_king() -> TestResult {
        let mut board = Board::from_fen("8/8/8/8/8/4k3/8/R3K3")?;
        // Rank 2 squares touch the black king on E3.
        assert_eq!(
            legal_destinations(&mut board, E1),
            SquareSet::from_squares(&[D1, F1])
        );
        Ok(())
    }

    #[test]
    fn test_king_cannot_retreat_along_check_line() -> TestResult {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4R1K1")?;
        assert_eq!(
            legal_destinations(&mut board, E8),
            SquareSet::from_squares(&[D8, F8, D7, F7])
        );
        Ok(())
    }

    #[test]
    fn test_king_cannot_capture_defended_piece() -> TestResult {
        let mut board = Board::from_fen("4k3/4Q3/4K3/8/8/8/8/8")?;
        assert!(legal_destinations(&mut board, E8).is_empty());
        Ok(())
    }

    #[test]
    fn test_pawn_moves() -> TestResult {
        let mut board = Board::from_fen("4k3/8/8/8/8/3p4/2P1P3/4K3")?;
        assert_eq!(legal_destinations(&mut board, C2), SquareSet::from_squares(&[C3, C4, D3]));
        assert_eq!(legal_destinations(&mut board, E2), SquareSet::from_squares(&[E3, E4, D3]));
        assert_eq!(legal_destinations(&mut board, D3), SquareSet::from_squares(&[C2, D2, E2]));
        Ok(())
    }

    #[test]
    fn test_pawn_cannot_capture_king_or_push_into_piece() -> TestResult {
        let mut board = Board::from_fen("8/8/8/3k4/4P3/8/8/6K1")?;
        assert_eq!(legal_destinations(&mut board, E4), SquareSet::from_square(E5));

        let mut board = Board::from_fen("8/8/8/3kr3/4P3/8/8/6K1")?;
        assert!(legal_destinations(&mut board, E4).is_empty());
        Ok(())
    }

    #[test]
    fn test_promotion_expands_to_four_moves() -> TestResult {
        let mut board = Board::from_fen("r3k3/1P6/8/8/8/8/8/4K3")?;
        let moves = legal_moves_from(&mut board, B7);

        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|mve| mve.to == A8).count(), 4);
        assert!(moves.iter().all(|mve| mve.promotion.is_some()));
        assert!(moves.contains(&Move::with_promotion(B7, B8, PieceKind::Knight)));
        Ok(())
    }

    #[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR" ; "start")]
    #[test_case("5rk1/1b3ppp/8/2RN4/8/8/2Q2PPP/6K1" ; "middlegame")]
    #[test_case("4k3/4r3/8/8/8/8/4R3/4K3" ; "pin")]
    #[test_case("4k3/8/8/r7/8/8/8/4R1K1" ; "check")]
    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R" ; "busy")]
    fn test_legal_is_subset_of_raw(fen: &str) -> TestResult {
        let mut board = Board::from_fen(fen)?;
        let pieces: Vec<Piece> = board.pieces().collect();

        for piece in pieces {
            if piece.kind == PieceKind::King {
                continue;
            }
            let raw = raw_destinations(&board, piece);
            let legal = legal_destinations(&mut board, piece.square);
            assert!(legal.is_subset(raw), "{:?} legal {:?} raw {:?}", piece, legal, raw);

            let pinned = x_ray_attacker(&board, piece.square, piece.color).is_some();
            if !pinned && !check_status(&board, piece.color).in_check() {
                assert_eq!(legal, raw, "{:?}", piece);
            }
        }
        Ok(())
    }

    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White ; "busy white")]
    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::Black ; "busy black")]
    #[test_case("4k3/8/3N4/q7/8/8/8/4R1K1", Color::Black ; "double check")]
    fn test_generated_moves_leave_king_safe(fen: &str, color: Color) -> TestResult {
        let mut board = Board::from_fen(fen)?;
        let start = board.clone();

        for mve in gen_moves(&mut board, color) {
            let state = board.make_move(mve);
            assert!(!check_status(&board, color).in_check(), "{} leaves king in check", mve);
            board.validate()?;
            board.unmake_move(state);
        }
        assert_eq!(board, start);
        Ok(())
    }
}
