//! 探索モジュール
//!
//! - `Search`: 反復深化の駆動と Lazy SMP（補助スレッドは置換表だけを共有する）
//! - `SearchLimits`: 深さ・時間・ノード数・停止フラグ
//! - `SearchResult`: 最善手、評価値、候補手、読み筋
//! - `alpha_beta`: negamax Alpha-Beta 探索本体

mod alpha_beta;
mod iterative;
mod limits;
mod ordering;
mod stats;
mod types;

pub use iterative::Search;
pub use limits::SearchLimits;
#[cfg(feature = "search-stats")]
pub use stats::SearchStats;
pub use types::{Candidate, SearchResult, StopReason};
