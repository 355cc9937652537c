//! 反転計算

use crate::bitboard::{Bitboard, Direction};
use crate::types::Square;

/// `sq` に打ったときに反転する相手石
///
/// 8方向それぞれについて、相手石の連続の先に自石があればその連続を反転する。
/// `sq` が空きマスであることは呼び出し側で保証する。
pub fn flips(player: Bitboard, opponent: Bitboard, sq: Square) -> Bitboard {
    let start = Bitboard::from_square(sq);
    let mut flipped = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut run = Bitboard::EMPTY;
        let mut cur = dir.shift(start);
        while (cur & opponent).is_not_empty() {
            run |= cur;
            cur = dir.shift(cur);
        }
        if (cur & player).is_not_empty() {
            flipped |= run;
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn bb(squares: &[&str]) -> Bitboard {
        squares
            .iter()
            .fold(Bitboard::EMPTY, |acc, s| acc.with(sq(s)))
    }

    #[test]
    fn test_flips_initial() {
        let player = bb(&["d5", "e4"]);
        let opponent = bb(&["d4", "e5"]);
        assert_eq!(flips(player, opponent, sq("d3")), bb(&["d4"]));
        assert_eq!(flips(player, opponent, sq("f5")), bb(&["e5"]));
        assert!(flips(player, opponent, sq("c3")).is_empty());
    }

    #[test]
    fn test_flips_multiple_directions() {
        // d4 に打つと東（e4, f4）と北（d5）の両方を返す
        let player = bb(&["g4", "d6"]);
        let opponent = bb(&["e4", "f4", "d5", "c3"]);
        assert_eq!(flips(player, opponent, sq("d4")), bb(&["e4", "f4", "d5"]));
    }

    #[test]
    fn test_flips_unterminated_run() {
        // 連続の先が空きや盤外なら返さない
        let player = Bitboard::EMPTY;
        let opponent = bb(&["b1", "c1"]);
        assert!(flips(player, opponent, sq("a1")).is_empty());
        let player = bb(&["a1"]);
        let opponent = bb(&["b1", "c1", "d1", "e1", "f1", "g1", "h1"]);
        assert!(flips(player, opponent, sq("a2")).is_empty());
    }
}
