use std::cmp::Reverse;

use crate::board::{Board, Move};
use crate::move_gen::{blocked_checker, gives_check};
use crate::piece::PieceKind;

pub(super) const GIVES_CHECK_BONUS: i32 = 5;

/// Sorts `moves` best first and keeps only the first `breadth` of them. Equal scores keep their
/// generation order.
pub(super) fn order_moves(moves: &mut Vec<Move>, board: &mut Board, breadth: Option<usize>) {
    moves.sort_by_cached_key(|&mve| Reverse(get_move_sort_key(mve, board)));
    if let Some(breadth) = breadth {
        moves.truncate(breadth);
    }
}

fn get_move_sort_key(mve: Move, board: &mut Board) -> i32 {
    let Some(piece) = board.piece_at(mve.from) else {
        return 0;
    };
    let enemy_king = board.king_square(piece.color.opposite());

    let capture_bonus = board.piece_at(mve.to).map_or(0, |victim| victim.kind.value());

    let positional_bonus = match piece.kind {
        PieceKind::King | PieceKind::Rook | PieceKind::Queen => {
            mve.from.manhattan_distance(enemy_king) - mve.to.manhattan_distance(enemy_king)
        }
        _ => 0,
    };

    capture_bonus + positional_bonus + get_check_bonus(mve, board)
}

fn get_check_bonus(mve: Move, board: &mut Board) -> i32 {
    let discovering = blocked_checker(board, mve.from);

    let state = board.make_move(mve);
    let mut bonus = 0;
    if gives_check(board, mve.to) {
        bonus += GIVES_CHECK_BONUS;
    }
    if discovering.is_some_and(|slider| gives_check(board, slider)) {
        bonus += GIVES_CHECK_BONUS;
    }
    board.unmake_move(state);

    bonus
}
