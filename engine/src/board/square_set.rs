use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use super::square::{Direction, Square};

/// A set of squares packed into one bit per square.
#[derive(PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const fn empty() -> Self {
        SquareSet(0)
    }

    pub const fn full() -> Self {
        SquareSet(u64::MAX)
    }

    pub const fn from_square(square: Square) -> Self {
        SquareSet(1 << (square as u8))
    }

    pub fn from_squares(squares: &[Square]) -> Self {
        squares.iter().copied().collect()
    }

    /// Squares strictly between `from` and `to`. Empty when they share no line.
    pub fn between(from: Square, to: Square) -> Self {
        let dir = Direction::between(from, to);
        if !dir.is_line() {
            return SquareSet::empty();
        }
        from.ray(dir.normalized())
            .take_while(|&sq| sq != to)
            .collect()
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square as u64
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square as u64)
    }

    pub fn contains(&self, square: Square) -> bool {
        self.0 & 1 << (square as u64) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_subset(self, other: SquareSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_repr(idx)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }
}

impl BitOr<Square> for SquareSet {
    type Output = SquareSet;

    fn bitor(self, other: Square) -> SquareSet {
        self | SquareSet::from_square(other)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }
}

impl BitAndAssign for SquareSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl Not for SquareSet {
    type Output = SquareSet;

    fn not(self) -> Self::Output {
        SquareSet(!self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);

        for (idx, square) in Square::list_white_perspective().into_iter().enumerate() {
            board_str.push(if self.contains(square) { 'X' } else { '.' });
            if (idx + 1) % 8 == 0 && idx != 63 {
                board_str.push('\n');
            }
        }

        write!(f, "{}", board_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square::*;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    #[test]
    fn test_debug() {
        let got = SquareSet::from_squares(&[A8, B7, C6, D5, E4, F3, G2, H1]);
        let want = "X.......\n.X......\n..X.....\n...X....\n....X...\n.....X..\n......X.\n.......X";
        assert_eq!(format!("{:?}", got), want);
    }

    #[test_case([B8, G6, A4, F1] ; "first")]
    fn test_contains(piece_squares: [Square; 4]) {
        let set = SquareSet::from_squares(&piece_squares);
        let inverse = !set;

        for sq in Square::iter() {
            assert_eq!(set.contains(sq), piece_squares.contains(&sq));
            assert_eq!(inverse.contains(sq), !piece_squares.contains(&sq));
        }
        assert_eq!(set.len(), 4);
    }

    #[test_case(A8, A3, SquareSet::from_squares(&[A4, A5, A6, A7]) ; "s")]
    #[test_case(A8, D8, SquareSet::from_squares(&[B8, C8]) ; "e")]
    #[test_case(B4, E1, SquareSet::from_squares(&[C3, D2]) ; "se")]
    #[test_case(E1, B4, SquareSet::from_squares(&[C3, D2]) ; "nw")]
    #[test_case(E1, E2, SquareSet::empty() ; "adjacent")]
    #[test_case(B1, C3, SquareSet::empty() ; "knight shaped")]
    fn test_between(start: Square, end: Square, want: SquareSet) {
        assert_eq!(SquareSet::between(start, end), want);
    }

    #[test]
    fn test_iter_and_remove() {
        let mut set = SquareSet::from_squares(&[H8, A1, D4]);
        set.remove(D4);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![A1, H8]);
        assert!(SquareSet::from_square(A1).is_subset(set));
        assert!(!set.is_subset(SquareSet::from_square(A1)));
    }
}
