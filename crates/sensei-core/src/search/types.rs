//! 探索結果の型

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::json::{CandidateJson, SearchReportJson};
use crate::types::{Bound, Depth, Move, Value};

/// 探索を終えた理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// 指定深さに到達
    Depth,
    /// 深さが空きマス数に達し、終局まで読み切った
    Solved,
    /// 時間切れ
    Time,
    /// ノード数上限
    Nodes,
    /// 外部からの停止要求
    Stopped,
    /// ルート局面が終局
    Terminal,
}

impl StopReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopReason::Depth => "depth",
            StopReason::Solved => "solved",
            StopReason::Time => "time",
            StopReason::Nodes => "nodes",
            StopReason::Stopped => "stopped",
            StopReason::Terminal => "terminal",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ルートの候補手と評価
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    /// 手番側から見た評価値
    pub score: Value,
    /// `Exact` 以外は探索窓の外で打ち切られた値
    pub bound: Bound,
}

/// 探索結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 最善手（終局局面では None）
    pub best_move: Option<Move>,
    /// 手番側から見た評価値
    pub score: Value,
    /// 完了した反復の深さ
    pub depth: Depth,
    /// 全スレッドの探索ノード数
    pub nodes: u64,
    /// 候補手（評価値の降順）
    pub candidates: Vec<Candidate>,
    /// 読み筋
    pub pv: Vec<Move>,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl SearchResult {
    /// 終局まで読み切れている場合の石差
    pub fn final_discs(&self) -> Option<i32> {
        match self.stop_reason {
            StopReason::Solved | StopReason::Terminal => {
                Some(self.score.raw() / Value::TERMINAL_SCALE)
            }
            _ => self.score.disc_difference(),
        }
    }

    /// JSON 表現に変換
    pub fn to_json(&self) -> SearchReportJson {
        SearchReportJson {
            best_move: self.best_move,
            score: self.score,
            final_discs: self.final_discs(),
            depth: self.depth,
            nodes: self.nodes,
            candidates: self
                .candidates
                .iter()
                .map(|c| CandidateJson {
                    mv: c.mv,
                    score: c.score,
                    bound: c.bound,
                })
                .collect(),
            pv: self.pv.clone(),
            elapsed_ms: self.elapsed.as_millis() as u64,
            stop_reason: self.stop_reason.as_str().to_string(),
        }
    }
}
