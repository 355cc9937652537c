//! 静的評価
//!
//! - `EvalParams`: 重み（serde で設定ファイルから読み込める）
//! - `Evaluator`: 手番側から見た評価値を返す

mod evaluate;
mod params;

pub use evaluate::{Evaluator, evaluate};
pub use params::EvalParams;
