//! エンジン設定

use serde::{Deserialize, Serialize};

use crate::eval::EvalParams;
use crate::types::{Depth, MAX_DEPTH, Value};

/// 置換表サイズの上限（MB）
pub const MAX_HASH_MB: usize = 1 << 16;

/// エンジン設定
///
/// ホストは TOML などから読み込んで渡す。省略した項目は既定値になる。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// 置換表サイズ（MB）
    pub hash_mb: usize,
    /// 探索スレッド数
    pub threads: usize,
    /// 制限が1つも指定されなかったときの探索深さ
    pub default_depth: Depth,
    /// ルートの全候補手を全幅の窓で探索する
    pub exact_root_scores: bool,
    pub eval: EvalParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: 16,
            threads: 1,
            default_depth: 10,
            exact_root_scores: true,
            eval: EvalParams::default(),
        }
    }
}

impl EngineConfig {
    /// 範囲外の値を丸めた設定
    pub fn normalized(mut self) -> Self {
        self.hash_mb = self.hash_mb.clamp(1, MAX_HASH_MB);
        self.threads = self.threads.max(1);
        self.default_depth = self.default_depth.clamp(1, MAX_DEPTH);
        self.eval = clamp_weights(self.eval);
        self
    }
}

/// 各重みを ±`Value::HEURISTIC_MAX` に収める
fn clamp_weights(params: EvalParams) -> EvalParams {
    let clamp = |w: i32| w.clamp(-Value::HEURISTIC_MAX, Value::HEURISTIC_MAX);
    EvalParams {
        disc_weight: clamp(params.disc_weight),
        mobility_weight: clamp(params.mobility_weight),
        corner_weight: clamp(params.corner_weight),
        edge_weight: clamp(params.edge_weight),
        x_square_penalty: clamp(params.x_square_penalty),
        c_square_penalty: clamp(params.c_square_penalty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.hash_mb, 16);
        assert_eq!(config.threads, 1);
        assert!(config.exact_root_scores);
        assert_eq!(config.eval, EvalParams::default());
    }

    #[test]
    fn test_config_normalized() {
        let config = EngineConfig {
            hash_mb: 0,
            threads: 0,
            default_depth: 500,
            ..EngineConfig::default()
        }
        .normalized();
        assert_eq!(config.hash_mb, 1);
        assert_eq!(config.threads, 1);
        assert_eq!(config.default_depth, MAX_DEPTH);
    }

    #[test]
    fn test_config_normalized_bounds_input() {
        let config = EngineConfig {
            hash_mb: usize::MAX,
            eval: EvalParams {
                disc_weight: 1_000_000_000,
                x_square_penalty: i32::MIN,
                ..EvalParams::default()
            },
            ..EngineConfig::default()
        }
        .normalized();
        assert_eq!(config.hash_mb, MAX_HASH_MB);
        assert_eq!(config.eval.disc_weight, Value::HEURISTIC_MAX);
        assert_eq!(config.eval.x_square_penalty, -Value::HEURISTIC_MAX);
        assert_eq!(config.eval.corner_weight, EvalParams::default().corner_weight);
    }

    #[test]
    fn test_config_json_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"threads": 4, "eval": {"corner_weight": 80}}"#).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.hash_mb, 16);
        assert_eq!(config.eval.corner_weight, 80);
        assert_eq!(config.eval.mobility_weight, EvalParams::default().mobility_weight);
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"hash": 4}"#).is_err());
    }
}
