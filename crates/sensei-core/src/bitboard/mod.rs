//! ビットボードモジュール
//!
//! 64マスの盤面を64bitで表現する（bit i = マス i、a1=0 〜 h8=63）。
//!
//! - `Bitboard`: 64bit盤面表現
//! - `Direction`: 8方向シフト（盤端の回り込みをマスクで除去）
//! - 筋・隅・辺のマスク

mod core;
mod shift;

pub use core::{Bitboard, BitboardIter};
pub use shift::Direction;

/// a筋
pub const FILE_A: Bitboard = Bitboard::new(0x0101_0101_0101_0101);
/// h筋
pub const FILE_H: Bitboard = Bitboard::new(0x8080_8080_8080_8080);
/// 1段目
pub const RANK_1: Bitboard = Bitboard::new(0x0000_0000_0000_00FF);
/// 8段目
pub const RANK_8: Bitboard = Bitboard::new(0xFF00_0000_0000_0000);

/// 四隅（a1, h1, a8, h8）
pub const CORNERS: Bitboard = Bitboard::new(0x8100_0000_0000_0081);
/// 外周（四隅を含む）
pub const EDGES: Bitboard = Bitboard::new(0xFF81_8181_8181_81FF);

/// 隅ごとの X マス（斜め隣）と C マス（辺上の隣）
///
/// 並びは a1, h1, a8, h8。
pub const CORNER_NEIGHBORS: [(Bitboard, Bitboard, Bitboard); 4] = [
    // (隅, X, C)
    (
        Bitboard::new(1 << 0),
        Bitboard::new(1 << 9),
        Bitboard::new((1 << 1) | (1 << 8)),
    ),
    (
        Bitboard::new(1 << 7),
        Bitboard::new(1 << 14),
        Bitboard::new((1 << 6) | (1 << 15)),
    ),
    (
        Bitboard::new(1 << 56),
        Bitboard::new(1 << 49),
        Bitboard::new((1 << 48) | (1 << 57)),
    ),
    (
        Bitboard::new(1 << 63),
        Bitboard::new(1 << 54),
        Bitboard::new((1 << 55) | (1 << 62)),
    ),
];

/// C マス全体
pub const C_SQUARES: Bitboard = Bitboard::new(
    CORNER_NEIGHBORS[0].2.raw()
        | CORNER_NEIGHBORS[1].2.raw()
        | CORNER_NEIGHBORS[2].2.raw()
        | CORNER_NEIGHBORS[3].2.raw(),
);
