//! perft（合法手生成の検証）

use crate::position::Board;

use super::flips;

/// 指定深さまでの葉ノード数を数える
///
/// パスも1手として数える。終局局面は深さが残っていても葉として1を返す。
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves_bb();
    if moves.is_empty() {
        if board.is_terminal() {
            return 1;
        }
        return perft(&board.pass(), depth - 1);
    }
    if depth == 1 {
        return u64::from(moves.count());
    }
    let (player, opponent) = (board.player(), board.opponent());
    moves
        .iter()
        .map(|sq| perft(&board.play(sq, flips(player, opponent, sq)), depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_initial() {
        let board = Board::initial();
        let expected = [1u64, 4, 12, 56, 244, 1396, 8200];
        for (depth, &nodes) in expected.iter().enumerate() {
            assert_eq!(perft(&board, depth as u32), nodes, "depth {depth}");
        }
    }

    #[test]
    fn test_perft_terminal_is_leaf() {
        let board: Board = format!("{}X", "X".repeat(64)).parse().unwrap();
        assert!(board.is_terminal());
        assert_eq!(perft(&board, 5), 1);
    }
}
