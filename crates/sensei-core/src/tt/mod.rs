//! 置換表モジュール
//!
//! 探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `TTEntry`: エントリ（ビジーフラグ + 黒白のビットボード + 圧縮データ）
//! - `Bucket`: 同じインデックスに対応するエントリのグループ
//! - `TranspositionTable`: テーブル本体
//! - 世代管理
//!
//! エントリは局面の全占有状態と手番を保持するため、キーの衝突で
//! 別局面のデータを返すことはない。他スレッドが使用中のエントリは
//! 参照時はミス、書き込み時は破棄として扱う。

mod entry;
mod table;

pub use entry::{TTData, TTEntry};
pub use table::{EvictionHook, TTStats, TranspositionTable};

/// バケットサイズ（エントリ数）
pub const BUCKET_SIZE: usize = 4;

/// 置換優先度で世代差1あたりに差し引く深さ
pub const AGE_WEIGHT: i32 = 8;
