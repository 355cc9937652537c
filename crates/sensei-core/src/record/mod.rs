//! 棋譜（Record）
//!
//! 書式:
//! - 任意の開始局面（64マス + 任意の手番記号、`position::text` と同じ記法）
//! - 指し手列: `f5`（大文字可）、`pass`/`pa`。連結・空白・カンマ区切りのいずれも可。
//!   `1.` のような手数表記は読み飛ばす。
//! - 対局情報: 指し手の後の `Key: value` 行
//!   （`Black`, `White`, `Tournament`, `Year`, `Black disks`, `White disks`, `Notes`。
//!   未知のキーは無視する）
//!
//! 解析時に再生まで行い、不正な手は `IllegalRecordedMove` になる。
//! 着手できない手番のパスは再生時に自動で補う。

mod parser;
mod replay;
mod writer;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::position::Board;
use crate::types::Move;
use crate::types::json::ReplayResultJson;

pub use replay::Replay;

/// 対局情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// 終局時の黒石数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_discs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_discs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecordMetadata {
    pub fn is_empty(&self) -> bool {
        *self == RecordMetadata::default()
    }
}

/// 棋譜
///
/// 生成時に再生して全手の合法性を確認済み。
#[derive(Debug, Clone)]
pub struct Record {
    start: Option<Board>,
    moves: Vec<Move>,
    metadata: RecordMetadata,
    /// 各手の棋譜テキスト中の位置（テキスト由来でなければ空）
    offsets: Vec<usize>,
}

impl Record {
    /// 開始局面と指し手列から生成（再生して合法性を確認する）
    pub fn new(start: Option<Board>, moves: Vec<Move>) -> Result<Record> {
        let record = Record {
            start,
            moves,
            metadata: RecordMetadata::default(),
            offsets: Vec::new(),
        };
        record.replay()?;
        Ok(record)
    }

    /// バイト列を解析する
    pub fn parse(bytes: &[u8]) -> Result<Record> {
        parser::parse(bytes)
    }

    /// 対局情報を設定する
    pub fn with_metadata(mut self, metadata: RecordMetadata) -> Record {
        self.metadata = metadata;
        self
    }

    /// 開始局面の指定（なければ None）
    pub fn board_override(&self) -> Option<&Board> {
        self.start.as_ref()
    }

    /// 開始局面
    pub fn start_board(&self) -> Board {
        self.start.unwrap_or_else(Board::initial)
    }

    /// 記録された指し手（補完されたパスを含まない）
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    /// 再生して全局面と実際の手順を得る
    pub fn replay(&self) -> Result<Replay> {
        replay::replay(self.start_board(), &self.moves, &self.offsets)
    }

    /// 記録された手を `ply` 手適用した局面（`ply` が手数を超える場合は最終局面）
    pub fn position_after(&self, ply: usize) -> Result<Board> {
        let replay = self.replay()?;
        Ok(replay.after_recorded(ply))
    }

    /// 最終局面
    pub fn final_board(&self) -> Result<Board> {
        self.position_after(self.moves.len())
    }

    /// 棋譜テキストに書き出す（`parse` で同じ棋譜に戻る）
    pub fn to_text(&self) -> String {
        writer::write(self)
    }

    /// 再生結果の JSON 表現
    pub fn replay_json(&self) -> Result<ReplayResultJson> {
        let replay = self.replay()?;
        Ok(ReplayResultJson {
            applied: replay.moves.clone(),
            last_ply: replay.moves.len() as u32,
            board: replay.final_board().into(),
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.moves == other.moves && self.metadata == other.metadata
    }
}

impl Eq for Record {}
