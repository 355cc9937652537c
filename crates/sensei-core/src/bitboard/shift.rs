//! 8方向シフト

use super::{Bitboard, FILE_A, FILE_H};

/// 8方向（盤面テキスト上で 1段目が上になる向き）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// +1（h筋方向）
    East,
    /// -1（a筋方向）
    West,
    /// +8（8段目方向）
    North,
    /// -8（1段目方向）
    South,
    /// +9
    NorthEast,
    /// +7
    NorthWest,
    /// -7
    SouthEast,
    /// -9
    SouthWest,
}

impl Direction {
    /// 全方向
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// 1マスずらす（盤外・反対端への回り込みは消える）
    #[inline]
    pub const fn shift(self, bb: Bitboard) -> Bitboard {
        let b = bb.raw();
        let not_a = !FILE_A.raw();
        let not_h = !FILE_H.raw();
        Bitboard::new(match self {
            Direction::East => (b << 1) & not_a,
            Direction::West => (b >> 1) & not_h,
            Direction::North => b << 8,
            Direction::South => b >> 8,
            Direction::NorthEast => (b << 9) & not_a,
            Direction::NorthWest => (b << 7) & not_h,
            Direction::SouthEast => (b >> 7) & not_a,
            Direction::SouthWest => (b >> 9) & not_h,
        })
    }
}
