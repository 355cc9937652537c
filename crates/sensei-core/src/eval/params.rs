//! 評価関数の重み

use serde::{Deserialize, Serialize};

/// 評価関数の重み
///
/// 各項は「手番側 − 相手側」の差に掛ける。X/C マスの減点は
/// 隣接する隅が空いているときだけ数える。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalParams {
    /// 石差
    pub disc_weight: i32,
    /// 着手可能数の差
    pub mobility_weight: i32,
    /// 隅の石
    pub corner_weight: i32,
    /// 辺の石（隅と C マスを除く）
    pub edge_weight: i32,
    /// 空き隅の斜め隣（X マス）の石
    pub x_square_penalty: i32,
    /// 空き隅の辺上の隣（C マス）の石
    pub c_square_penalty: i32,
}

impl EvalParams {
    /// 石差だけを数える重み（テストや比較用）
    pub const fn baseline() -> Self {
        Self {
            disc_weight: 1,
            mobility_weight: 0,
            corner_weight: 0,
            edge_weight: 0,
            x_square_penalty: 0,
            c_square_penalty: 0,
        }
    }
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            disc_weight: 1,
            mobility_weight: 12,
            corner_weight: 60,
            edge_weight: 4,
            x_square_penalty: 30,
            c_square_penalty: 12,
        }
    }
}
