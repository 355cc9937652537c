//! 局面モジュール
//!
//! - `Board`: 黒石・白石の2つのビットボードと手番からなる不変の値
//! - `zobrist`: 局面キー（Zobrist ハッシュ）
//! - `text`: 盤面テキストの解析・出力、JSON 表現との変換

mod board;
pub mod text;
mod zobrist;

pub use board::Board;
pub use zobrist::{zobrist_disc, zobrist_side};
