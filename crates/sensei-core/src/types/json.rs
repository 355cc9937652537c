//! ホストとの受け渡しに使う JSON 表現
//!
//! 変換は各モジュール側（`Board`、`SearchResult`）で実装する。

use serde::{Deserialize, Serialize};

use super::{Bound, Color, Move, Value};

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardStateJson {
    /// 8行の文字列（1段目が先頭、各行は a〜h の順、`X`/`O`/`-`）
    pub rows: Vec<String>,
    /// 手番: "black" | "white"
    pub turn: Color,
    /// 黒石の数
    pub black: u32,
    /// 白石の数
    pub white: u32,
    /// 手数（省略可）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ply: Option<u32>,
}

/// ルート局面の候補手1つ分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateJson {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: Value,
    pub bound: Bound,
}

/// 探索結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchReportJson {
    /// 最善手（終局局面では null）
    pub best_move: Option<Move>,
    /// 手番側から見た評価値
    pub score: Value,
    /// 終局が読み切れている場合の石差
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_discs: Option<i32>,
    pub depth: i32,
    pub nodes: u64,
    pub candidates: Vec<CandidateJson>,
    pub pv: Vec<Move>,
    pub elapsed_ms: u64,
    /// "depth" | "solved" | "time" | "nodes" | "stopped" | "terminal"
    pub stop_reason: String,
}

/// 解析リクエストの応答（探索した局面つき）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisJson {
    pub board: BoardStateJson,
    #[serde(flatten)]
    pub report: SearchReportJson,
}

/// 棋譜リプレイ結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayResultJson {
    /// パスを補った実際の手順
    pub applied: Vec<Move>,
    pub last_ply: u32,
    pub board: BoardStateJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_json_field_names() {
        let c = CandidateJson {
            mv: Move::PASS,
            score: Value::new(-30),
            bound: Bound::Exact,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"move":"pass","score":-30,"bound":"exact"}"#);
    }

    #[test]
    fn test_board_state_json_ply_omitted() {
        let state = BoardStateJson {
            rows: vec!["--------".to_string(); 8],
            turn: Color::White,
            black: 0,
            white: 0,
            ply: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("ply"));
        assert!(json.contains(r#""turn":"white""#));
        let back: BoardStateJson = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
