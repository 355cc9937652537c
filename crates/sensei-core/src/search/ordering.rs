//! 指し手の並べ替え
//!
//! 置換表（または前回反復）の最善手を先頭にし、残りはマス番号の昇順。
//! Lazy SMP の補助スレッドは残りの並びを回転させて探索順をずらす。

use crate::bitboard::Bitboard;
use crate::types::{Move, Square};

/// 並べ替え済みの着手マス（固定長バッファ）
pub(super) struct OrderedMoves {
    squares: [Square; Square::NUM],
    len: usize,
}

impl OrderedMoves {
    pub(super) fn new(moves: Bitboard, first: Move, rotate: usize) -> Self {
        let mut squares = [Square::A1; Square::NUM];
        let mut len = 0;

        let first = first.square().filter(|&sq| moves.contains(sq));
        if let Some(sq) = first {
            squares[0] = sq;
            len = 1;
        }
        let start = len;
        for sq in moves.iter() {
            if Some(sq) != first {
                squares[len] = sq;
                len += 1;
            }
        }
        let rest = len - start;
        if rest > 1 && rotate > 0 {
            squares[start..len].rotate_left(rotate % rest);
        }
        Self { squares, len }
    }

    #[inline]
    pub(super) fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }
}
