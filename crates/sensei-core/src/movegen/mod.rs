//! 合法手生成モジュール
//!
//! - `legal_moves_bb`: 着手可能マスの集合（8方向の dumb7fill）
//! - `flips`: 着手時に反転する石
//! - `LegalMoves`: 合法手の遅延列挙（マス番号の昇順）
//! - `perft`: 合法手生成の検証用ノード数計測
//! - `stable_discs`: 確定石（終盤探索の枝刈りに使う）

mod flip;
mod generator;
mod perft;
mod stable;

pub use flip::flips;
pub use generator::{LegalMoves, legal_moves, legal_moves_bb, mobility};
pub use perft::perft;
pub use stable::stable_discs;
