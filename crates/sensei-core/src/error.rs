//! エラー型
//!
//! 予算切れ（時間・ノード数・停止要求）はエラーではなく
//! `search::StopReason` で表す。

use crate::types::Move;

/// エンジンのエラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SenseiError {
    /// 盤面が不正（黒白の重複、文字列の形式誤りなど）
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// 現在の局面で合法でない指し手
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// 棋譜の構文エラー（`offset` は最初に解釈できなかったバイト位置）
    #[error("malformed record at byte {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: String },

    /// 棋譜中の指し手が再生中の局面で合法でない
    #[error("illegal recorded move #{index} ({mv}){}", fmt_offset(.offset))]
    IllegalRecordedMove {
        /// 棋譜上の指し手番号（0始まり、補完されたパスは数えない）
        index: usize,
        mv: Move,
        /// 棋譜テキスト中の位置（テキスト由来でない場合は None）
        offset: Option<usize>,
    },
}

fn fmt_offset(offset: &Option<usize>) -> String {
    match offset {
        Some(o) => format!(" at byte {o}"),
        None => String::new(),
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SenseiError>;
