//! オセロ（リバーシ）解析エンジンのコアライブラリ
//!
//! - `bitboard`: 64マスの占有集合と8方向シフト
//! - `position`: 局面（`Board`）と Zobrist キー
//! - `movegen`: 合法手生成・反転計算・perft
//! - `eval`: 静的評価関数
//! - `tt`: 置換表
//! - `search`: 反復深化 Alpha-Beta 探索
//! - `record`: 棋譜の解析・書き出し・再生
//! - `engine`: ホストアプリケーションとのリクエスト/レスポンス境界
//!
//! ファイルI/Oは行わない。棋譜はホスト側で読み込んだバイト列として受け取る。

pub mod bitboard;
pub mod engine;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod position;
pub mod record;
pub mod search;
pub mod tt;
pub mod types;

pub use engine::{Engine, EngineConfig, EngineRequest, EngineResponse, EngineService};
pub use error::{Result, SenseiError};
pub use position::Board;
pub use record::Record;
pub use search::{Search, SearchLimits, SearchResult};
pub use types::{Bound, Color, Move, Square, Value};
