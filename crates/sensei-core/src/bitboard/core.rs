//! Bitboard（64bit盤面表現）

use crate::types::Square;

/// Bitboard（bit i = マス i）
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl Bitboard {
    /// 空のBitboard
    pub const EMPTY: Bitboard = Bitboard(0);

    /// 全マスが立っているBitboard
    pub const ALL: Bitboard = Bitboard(u64::MAX);

    /// 生の値から生成
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// 単一マスのBitboard
    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(sq.bit())
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 空でないかどうか
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// ビットが立っている数
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// 指定マスにビットが立っているか
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bit() != 0
    }

    /// 最下位ビットのSquareを取得（消さない）
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    /// 最下位ビットのSquareを取得して消す
    #[inline]
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// 指定マスのビットを立てたBitboardを返す
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | sq.bit())
    }

    /// 昇順（a1, b1, …, h8）にマスを列挙
    #[inline]
    pub const fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Bitboardのマス列挙（昇順）
#[derive(Clone, Debug)]
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        self.iter()
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl std::fmt::Debug for Bitboard {
    /// 1段目を先頭に、a〜h の順で `*`/`.` を並べる
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bitboard({:#018x})", self.0)?;
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let bit = 1u64 << (rank * 8 + file);
                f.write_str(if self.0 & bit != 0 { "*" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_bitboard_basic() {
        let bb = Bitboard::from_square(sq("d4")).with(sq("e5"));
        assert_eq!(bb.count(), 2);
        assert!(bb.contains(sq("d4")));
        assert!(!bb.contains(sq("d5")));
        assert!(Bitboard::EMPTY.is_empty());
        assert!(bb.is_not_empty());
    }

    #[test]
    fn test_bitboard_iter_ascending() {
        let bb = Bitboard::from_square(sq("h8"))
            .with(sq("a1"))
            .with(sq("c4"));
        let squares: Vec<String> = bb.iter().map(|s| s.to_string()).collect();
        assert_eq!(squares, vec!["a1", "c4", "h8"]);
        assert_eq!(bb.iter().len(), 3);
    }

    #[test]
    fn test_bitboard_pop() {
        let mut bb = Bitboard::from_square(sq("b2")).with(sq("g7"));
        assert_eq!(bb.pop(), Some(sq("b2")));
        assert_eq!(bb.pop(), Some(sq("g7")));
        assert_eq!(bb.pop(), None);
    }

    #[test]
    fn test_bitboard_ops() {
        let a = Bitboard::new(0b1100);
        let b = Bitboard::new(0b1010);
        assert_eq!((a & b).raw(), 0b1000);
        assert_eq!((a | b).raw(), 0b1110);
        assert_eq!((a ^ b).raw(), 0b0110);
        assert_eq!((!Bitboard::EMPTY), Bitboard::ALL);
    }
}
