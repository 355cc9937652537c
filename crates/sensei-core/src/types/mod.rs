//! 基本型
//!
//! - `Color`: 手番（黒=先手/暗色、白=後手/明色）
//! - `Square`: 盤上のマス（a1=0 〜 h8=63）
//! - `Move`: 指し手（マス または パス）
//! - `Value`: 評価値
//! - `Bound`: 置換表に格納する値の種類

mod bound;
mod color;
pub mod json;
mod moves;
mod square;
mod value;

pub use bound::Bound;
pub use color::Color;
pub use moves::Move;
pub use square::Square;
pub use value::Value;

/// 探索深さ（手数、パスも1手と数える）
pub type Depth = i32;

/// 反復深化の最大深さ
///
/// 空きマスは最大60、パスは深さを消費しないため 60 で十分。
pub const MAX_DEPTH: Depth = 60;

/// 探索スタックの最大 ply（パスを含む）
pub const MAX_PLY: usize = 128;
