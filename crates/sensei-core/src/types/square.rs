//! マス（Square）
//!
//! インデックスは `rank * 8 + file`（a1=0, b1=1, …, h8=63）。
//! 文字列表記は `a1`〜`h8`（大文字も受け付ける）。

use std::fmt;
use std::str::FromStr;

/// 盤上のマス
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// マスの数
    pub const NUM: usize = 64;

    pub const A1: Square = Square(0);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const H8: Square = Square(63);

    /// インデックスから生成（64以上は None）
    #[inline]
    pub const fn new(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// 筋（0=a 〜 7=h）と段（0=1 〜 7=8）から生成
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// 範囲チェック済みのインデックスから生成
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// インデックス（0〜63）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 筋（0=a 〜 7=h）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// 段（0=1 〜 7=8）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// このマスだけが立ったビット
    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// 全マスを a1, b1, …, h8 の順に列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(());
        }
        Square::from_file_rank(file - b'a', rank - b'1').ok_or(())
    }
}
