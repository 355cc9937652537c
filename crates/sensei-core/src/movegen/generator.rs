//! 指し手生成器

use crate::bitboard::{Bitboard, Direction};
use crate::position::Board;
use crate::types::Move;

/// 着手可能なマスの集合
///
/// 各方向について「相手石の連続」を最大6マス伸ばし、その先の空きマスを集める。
#[inline]
pub fn legal_moves_bb(player: Bitboard, opponent: Bitboard) -> Bitboard {
    let empty = !(player | opponent);
    let mut moves = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut run = dir.shift(player) & opponent;
        for _ in 0..5 {
            run |= dir.shift(run) & opponent;
        }
        moves |= dir.shift(run) & empty;
    }
    moves
}

/// 着手可能なマスの数
#[inline]
pub fn mobility(player: Bitboard, opponent: Bitboard) -> u32 {
    legal_moves_bb(player, opponent).count()
}

/// 合法手（着手マス）をマス番号の昇順で列挙する
///
/// パスは含まない。空ならパスのみが合法、または終局。
pub fn legal_moves(board: &Board) -> LegalMoves {
    LegalMoves {
        remaining: board.legal_moves_bb(),
    }
}

/// 合法手の遅延イテレータ
#[derive(Clone, Debug)]
pub struct LegalMoves {
    remaining: Bitboard,
}

impl Iterator for LegalMoves {
    type Item = Move;

    #[inline]
    fn next(&mut self) -> Option<Move> {
        self.remaining.pop().map(Move::from_square)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LegalMoves {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::flips;
    use crate::types::Square;

    #[test]
    fn test_initial_mobility() {
        let board = Board::initial();
        assert_eq!(mobility(board.player(), board.opponent()), 4);
        assert_eq!(legal_moves(&board).len(), 4);
    }

    #[test]
    fn test_generated_moves_all_flip() {
        // 数手進めた局面でも、生成された手はすべて石を返す
        let mut board = Board::initial();
        for mv in ["f5", "d6", "c3", "d3", "c4"] {
            board = board.apply(mv.parse().unwrap()).unwrap();
        }
        for mv in legal_moves(&board) {
            let sq = mv.square().unwrap();
            assert!(flips(board.player(), board.opponent(), sq).is_not_empty());
        }
        // 生成されない空きマスは石を返さない
        let legal = board.legal_moves_bb();
        for sq in (board.empties() & !legal).iter() {
            assert!(flips(board.player(), board.opponent(), sq).is_empty());
        }
    }

    #[test]
    fn test_long_run_across_board() {
        // a1 に黒、b1〜g1 に白、h1 が空き → 黒は h1 に打てる
        let player = Bitboard::from_square(Square::A1);
        let opponent = Bitboard::new(0x7E);
        let moves = legal_moves_bb(player, opponent);
        assert!(moves.contains(Square::H1));
        assert_eq!(moves.count(), 1);
    }

    #[test]
    fn test_no_wrap_between_ranks() {
        // h1 に黒、a2 に白、b2 が空き: 東方向の回り込みで b2 を生成しない
        let player = Bitboard::from_square(Square::H1);
        let opponent = Bitboard::from_square("a2".parse().unwrap());
        assert!(legal_moves_bb(player, opponent).is_empty());
    }
}
