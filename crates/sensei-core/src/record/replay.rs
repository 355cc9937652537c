//! 棋譜の再生

use crate::error::{Result, SenseiError};
use crate::position::Board;
use crate::types::Move;

/// 再生結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// 開始局面と各手の後の局面（`moves.len() + 1` 個）
    pub boards: Vec<Board>,
    /// 補完したパスを含む実際の手順
    pub moves: Vec<Move>,
    /// 記録された手 i を適用した直後の `boards` のインデックス
    recorded: Vec<usize>,
}

impl Replay {
    /// 最終局面
    pub fn final_board(&self) -> Board {
        self.boards.last().copied().unwrap_or_default()
    }

    /// 記録された手を `ply` 手適用した直後の局面
    pub fn after_recorded(&self, ply: usize) -> Board {
        match ply {
            0 => self.boards.first().copied().unwrap_or_default(),
            n => match self.recorded.get(n - 1) {
                Some(&index) => self.boards[index],
                None => self.final_board(),
            },
        }
    }
}

/// 記録された手を順に適用する
///
/// 手番側が着手できず相手が着手できる局面では、記録にパスがなくても補う。
pub(super) fn replay(start: Board, moves: &[Move], offsets: &[usize]) -> Result<Replay> {
    let mut boards = Vec::with_capacity(moves.len() + 1);
    let mut applied = Vec::with_capacity(moves.len());
    let mut recorded = Vec::with_capacity(moves.len());
    let mut board = start;
    boards.push(board);

    for (index, &mv) in moves.iter().enumerate() {
        let illegal = || SenseiError::IllegalRecordedMove {
            index,
            mv,
            offset: offsets.get(index).copied(),
        };
        if !mv.is_pass() && board.must_pass() {
            board = board.apply(Move::PASS).map_err(|_| illegal())?;
            boards.push(board);
            applied.push(Move::PASS);
        }
        board = board.apply(mv).map_err(|_| illegal())?;
        boards.push(board);
        applied.push(mv);
        recorded.push(boards.len() - 1);
    }

    Ok(Replay {
        boards,
        moves: applied,
        recorded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_replay_lengths() {
        let moves: Vec<Move> = ["f5", "d6", "c3"].iter().map(|m| m.parse().unwrap()).collect();
        let replay = replay(Board::initial(), &moves, &[]).unwrap();
        assert_eq!(replay.boards.len(), 4);
        assert_eq!(replay.moves, moves);
        assert_eq!(replay.final_board().side_to_move(), Color::White);
    }

    #[test]
    fn test_replay_inserts_forced_pass() {
        // 白番で着手不能、黒は c1 に打てる
        let start: Board = format!("XO{}O", "-".repeat(62)).parse().unwrap();
        let c1: Move = "c1".parse().unwrap();
        let replay = replay(start, &[c1], &[]).unwrap();
        assert_eq!(replay.moves, vec![Move::PASS, c1]);
        assert_eq!(replay.boards.len(), replay.moves.len() + 1);
        assert_eq!(replay.after_recorded(1), replay.final_board());
    }

    #[test]
    fn test_replay_explicit_pass() {
        let start: Board = format!("XO{}O", "-".repeat(62)).parse().unwrap();
        let moves = [Move::PASS, "c1".parse().unwrap()];
        let replay = replay(start, &moves, &[]).unwrap();
        assert_eq!(replay.moves, moves.to_vec());
    }

    #[test]
    fn test_replay_unneeded_pass_rejected() {
        let err = replay(Board::initial(), &[Move::PASS], &[7]).unwrap_err();
        assert_eq!(
            err,
            SenseiError::IllegalRecordedMove {
                index: 0,
                mv: Move::PASS,
                offset: Some(7),
            }
        );
    }
}
