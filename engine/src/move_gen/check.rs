use crate::board::{Board, Direction, Square, SquareSet, KING_STEPS, KNIGHT_STEPS};
use crate::piece::{Capability, Color, PieceKind};

/// Who is attacking a king right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckStatus {
    pub attacker_count: u8,
    /// Last attacker found. Only meaningful when `attacker_count == 1`.
    pub attacker: Option<Square>,
    /// Whether `attacker` is a slider whose line can be interposed.
    pub blockable: bool,
}

impl CheckStatus {
    pub fn in_check(&self) -> bool {
        self.attacker_count > 0
    }

    pub fn is_double_check(&self) -> bool {
        self.attacker_count >= 2
    }

    /// Squares a non-king piece may move to so that the check is answered.
    pub fn response_mask(&self, king: Square) -> SquareSet {
        match (self.attacker_count, self.attacker) {
            (0, _) => SquareSet::full(),
            (1, Some(attacker)) if self.blockable => {
                SquareSet::between(king, attacker) | attacker
            }
            (1, Some(attacker)) => SquareSet::from_square(attacker),
            _ => SquareSet::empty(),
        }
    }
}

pub fn check_status(board: &Board, king_color: Color) -> CheckStatus {
    let king = board.king_square(king_color);
    let mut status = CheckStatus::default();

    // A knight and a pawn can't both be giving check, so these count once at most.
    if let Some(attacker) = leaper_attacker(board, king, king_color) {
        status.attacker_count = 1;
        status.attacker = Some(attacker);
    }

    for dir in KING_STEPS {
        let Some(sq) = first_piece(board, king, dir) else {
            continue;
        };
        if let Some(piece) = board.piece_at(sq) {
            if piece.color != king_color && piece.kind.slides_along(dir) {
                status.attacker_count += 1;
                status.attacker = Some(sq);
                status.blockable = piece.kind.is_check_blockable();
            }
        }
    }

    status
}

fn leaper_attacker(board: &Board, king: Square, king_color: Color) -> Option<Square> {
    let knight = KNIGHT_STEPS
        .iter()
        .filter_map(|&dir| king.offset(dir))
        .find(|&sq| {
            matches!(board.piece_at(sq), Some(p) if p.color != king_color && p.kind == PieceKind::Knight)
        });
    if knight.is_some() {
        return knight;
    }

    // An enemy pawn attacks the king from where a pawn of the king's color would capture.
    let forward = king_color.pawn_forward();
    [-1, 1]
        .into_iter()
        .filter_map(|d_col| king.offset(Direction::new(forward, d_col)))
        .find(|&sq| {
            matches!(board.piece_at(sq), Some(p) if p.color != king_color && p.kind == PieceKind::Pawn)
        })
}

/// First occupied square walking from `from` in `dir`.
fn first_piece(board: &Board, from: Square, dir: Direction) -> Option<Square> {
    from.ray(dir).find(|&sq| !board.is_empty_at(sq))
}

/// Squares the piece on `square` attacks, counting the first blocker on each ray whatever its
/// color.
pub fn attacked_squares(board: &Board, square: Square) -> SquareSet {
    let Some(piece) = board.piece_at(square) else {
        return SquareSet::empty();
    };

    match piece.kind.capability() {
        Capability::Steps(steps) => steps.iter().filter_map(|&dir| square.offset(dir)).collect(),
        Capability::Rays(rays) => {
            let mut attacked = SquareSet::empty();
            for &dir in rays {
                for sq in square.ray(dir) {
                    attacked.insert(sq);
                    if !board.is_empty_at(sq) {
                        break;
                    }
                }
            }
            attacked
        }
        Capability::Pawn => [-1, 1]
            .into_iter()
            .filter_map(|d_col| square.offset(Direction::new(piece.color.pawn_forward(), d_col)))
            .collect(),
    }
}

/// Whether the piece on `square` attacks the enemy king.
pub fn gives_check(board: &Board, square: Square) -> bool {
    let Some(piece) = board.piece_at(square) else {
        return false;
    };
    attacked_squares(board, square).contains(board.king_square(piece.color.opposite()))
}

/// The slider opposing `king_color` whose line to that king is blocked only by the piece on
/// `square`. For a piece of `king_color` this is its pinner; for an enemy piece it is the
/// slider that gives discovered check when the piece steps off the line.
pub fn x_ray_attacker(board: &Board, square: Square, king_color: Color) -> Option<Square> {
    let king = board.king_square(king_color);
    let offset = Direction::between(king, square);
    if !offset.is_line() {
        return None;
    }
    let dir = offset.normalized();

    if first_piece(board, king, dir) != Some(square) {
        return None;
    }

    let behind = first_piece(board, square, dir)?;
    let piece = board.piece_at(behind)?;
    (piece.color != king_color && piece.kind.slides_along(dir)).then_some(behind)
}

/// The friendly slider that would give discovered check if the piece on `square` moved off its
/// line to the enemy king.
pub fn blocked_checker(board: &Board, square: Square) -> Option<Square> {
    let piece = board.piece_at(square)?;
    x_ray_attacker(board, square, piece.color.opposite())
}
