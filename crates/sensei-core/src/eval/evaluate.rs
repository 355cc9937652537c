//! 評価関数本体

use super::EvalParams;
use crate::bitboard::{Bitboard, C_SQUARES, CORNER_NEIGHBORS, CORNERS, EDGES};
use crate::movegen::mobility;
use crate::position::Board;
use crate::types::Value;

/// 隅・C マスを除いた辺
const PLAIN_EDGES: Bitboard = Bitboard::new(EDGES.raw() & !CORNERS.raw() & !C_SQUARES.raw());

#[inline]
fn diff(player: Bitboard, opponent: Bitboard, mask: Bitboard) -> i64 {
    (player & mask).count() as i64 - (opponent & mask).count() as i64
}

/// 手番側から見た評価値
///
/// 終局局面は `石差 * Value::TERMINAL_SCALE`、それ以外は ±`Value::HEURISTIC_MAX`
/// に丸めた静的評価を返す。重みは設定ファイル由来なので i64 で積算する。
pub fn evaluate(board: &Board, params: &EvalParams) -> Value {
    let player = board.player();
    let opponent = board.opponent();

    let player_mobility = mobility(player, opponent) as i64;
    let opponent_mobility = mobility(opponent, player) as i64;
    if player_mobility == 0 && opponent_mobility == 0 {
        return Value::from_disc_difference(board.disc_difference());
    }

    let mut score = board.disc_difference() as i64 * params.disc_weight as i64;
    score += (player_mobility - opponent_mobility) * params.mobility_weight as i64;
    score += diff(player, opponent, CORNERS) * params.corner_weight as i64;
    score += diff(player, opponent, PLAIN_EDGES) * params.edge_weight as i64;

    let occupied = player | opponent;
    for (corner, x, c) in CORNER_NEIGHBORS {
        if (occupied & corner).is_not_empty() {
            continue;
        }
        score -= diff(player, opponent, x) * params.x_square_penalty as i64;
        score -= diff(player, opponent, c) * params.c_square_penalty as i64;
    }

    let limit = Value::HEURISTIC_MAX as i64;
    Value::heuristic(score.clamp(-limit, limit) as i32)
}

/// 重みを保持した評価器
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluator {
    params: EvalParams,
}

impl Evaluator {
    pub const fn new(params: EvalParams) -> Self {
        Self { params }
    }

    pub const fn params(&self) -> &EvalParams {
        &self.params
    }

    #[inline]
    pub fn evaluate(&self, board: &Board) -> Value {
        evaluate(board, &self.params)
    }
}
