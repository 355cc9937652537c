//! Zobrist ハッシュのテーブル
//!
//! 固定シードの xoshiro256++ で生成するため、実行ごとに同じキーになる。

use std::sync::LazyLock;

use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{Color, Square};

const ZOBRIST_SEED: u64 = 0x0de1_10ce_5e05_e100;

struct ZobristTable {
    disc: [[u64; Square::NUM]; Color::NUM],
    side: u64,
}

static ZOBRIST: LazyLock<ZobristTable> = LazyLock::new(|| {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);
    let mut disc = [[0u64; Square::NUM]; Color::NUM];
    for table in disc.iter_mut() {
        for key in table.iter_mut() {
            *key = rng.next_u64();
        }
    }
    ZobristTable {
        disc,
        side: rng.next_u64(),
    }
});

/// 指定色の石がマスにあることを表す乱数
#[inline]
pub fn zobrist_disc(color: Color, sq: Square) -> u64 {
    ZOBRIST.disc[color.index()][sq.index()]
}

/// 白番であることを表す乱数
#[inline]
pub fn zobrist_side() -> u64 {
    ZOBRIST.side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_distinct() {
        let a1 = "a1".parse().unwrap();
        assert_ne!(zobrist_disc(Color::Black, a1), zobrist_disc(Color::White, a1));
        assert_ne!(zobrist_side(), 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let sq = "e4".parse().unwrap();
        assert_eq!(zobrist_disc(Color::Black, sq), zobrist_disc(Color::Black, sq));
    }
}
