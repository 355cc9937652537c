//! 確定石（以後どの着手でも返らない石）の保守的な判定
//!
//! 4本の軸（横・縦・2本の斜め）それぞれについて、次のいずれかを満たす石を確定とみなす。
//! - その軸の列が空きなく埋まっている
//! - 軸方向の隣のどちらかが盤外
//! - 軸方向の隣のどちらかが同色の確定石
//!
//! 隅から始めて不動点まで広げる。真の確定石の部分集合を返す。

use crate::bitboard::{Bitboard, Direction, EDGES, FILE_A, FILE_H, RANK_1, RANK_8};

const fn rank_masks() -> [u64; 8] {
    let mut masks = [0u64; 8];
    let mut r = 0;
    while r < 8 {
        masks[r] = 0xFF << (8 * r);
        r += 1;
    }
    masks
}

const fn file_masks() -> [u64; 8] {
    let mut masks = [0u64; 8];
    let mut f = 0;
    while f < 8 {
        masks[f] = FILE_A.raw() << f;
        f += 1;
    }
    masks
}

/// `anti` が偽なら a1-h8 向き、真なら h1-a8 向きの斜め列
const fn diagonal_masks(anti: bool) -> [u64; 15] {
    let mut masks = [0u64; 15];
    let mut sq = 0;
    while sq < 64 {
        let (file, rank) = (sq % 8, sq / 8);
        let index = if anti { file + rank } else { file + 7 - rank };
        masks[index] |= 1u64 << sq;
        sq += 1;
    }
    masks
}

const RANKS: [u64; 8] = rank_masks();
const FILES: [u64; 8] = file_masks();
const DIAGONALS: [u64; 15] = diagonal_masks(false);
const ANTI_DIAGONALS: [u64; 15] = diagonal_masks(true);

/// 埋まっている列の和集合
fn full_lines(occupied: u64, lines: &[u64]) -> Bitboard {
    Bitboard::new(
        lines
            .iter()
            .filter(|&&line| occupied & line == line)
            .fold(0, |acc, &line| acc | line),
    )
}

/// `own` の確定石
///
/// `other` は相手の石（列が埋まっているかの判定にだけ使う）。
pub fn stable_discs(own: Bitboard, other: Bitboard) -> Bitboard {
    let occupied = (own | other).raw();
    // (軸の正方向, 逆方向, 軸方向に盤外と接するマス, 埋まった列)
    let axes = [
        (Direction::East, Direction::West, FILE_A | FILE_H, full_lines(occupied, &RANKS)),
        (Direction::North, Direction::South, RANK_1 | RANK_8, full_lines(occupied, &FILES)),
        (Direction::NorthEast, Direction::SouthWest, EDGES, full_lines(occupied, &DIAGONALS)),
        (Direction::NorthWest, Direction::SouthEast, EDGES, full_lines(occupied, &ANTI_DIAGONALS)),
    ];

    let mut stable = Bitboard::EMPTY;
    loop {
        let mut next = own;
        for &(forward, backward, wall, full) in &axes {
            next &= full | wall | forward.shift(stable) | backward.shift(stable);
        }
        if next == stable {
            return stable;
        }
        stable = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Board;
    use crate::types::{Color, Move, Square};
    use rand::{RngCore, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn squares(names: &[&str]) -> Bitboard {
        names
            .iter()
            .fold(Bitboard::EMPTY, |acc, s| acc.with(s.parse::<Square>().unwrap()))
    }

    #[test]
    fn test_initial_board_has_no_stable_discs() {
        let board = Board::initial();
        assert!(stable_discs(board.player(), board.opponent()).is_empty());
        assert!(stable_discs(board.opponent(), board.player()).is_empty());
    }

    #[test]
    fn test_corner_is_stable_and_neighbor_is_not() {
        let black = squares(&["a1"]);
        let white = squares(&["b1"]);
        assert_eq!(stable_discs(black, white), black);
        assert!(stable_discs(white, black).is_empty());
    }

    #[test]
    fn test_stability_spreads_from_corner() {
        let black = squares(&["a1", "b1", "a2", "b2"]);
        // b2 は a3-c1 の斜めが空いているので返り得る
        assert_eq!(stable_discs(black, Bitboard::EMPTY), squares(&["a1", "b1", "a2"]));
    }

    #[test]
    fn test_filled_edge_is_stable() {
        let black = RANK_1;
        assert_eq!(stable_discs(black, Bitboard::EMPTY), RANK_1);
    }

    #[test]
    fn test_full_board_is_all_stable() {
        let black = Bitboard::new(0x00FF_00FF_00FF_00FF);
        let white = !black;
        assert_eq!(stable_discs(black, white), black);
        assert_eq!(stable_discs(white, black), white);
    }

    #[test]
    fn test_stable_discs_never_flip_in_random_games() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = Board::initial();
            let mut stable = [Bitboard::EMPTY; 2];
            while !board.is_terminal() {
                for color in [Color::Black, Color::White] {
                    let own = board.bitboard(color);
                    let other = board.bitboard(color.opponent());
                    // 一度確定した石は同色のまま残る
                    assert_eq!(own & stable[color.index()], stable[color.index()]);
                    stable[color.index()] |= stable_discs(own, other);
                }
                let mv = if board.must_pass() {
                    Move::PASS
                } else {
                    let legal: Vec<Move> = board.legal_moves().collect();
                    legal[(rng.next_u64() % legal.len() as u64) as usize]
                };
                board = board.apply(mv).unwrap();
            }
        }
    }
}
