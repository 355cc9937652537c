//! ホストアプリケーションとの境界
//!
//! - `Engine`: 局面または棋譜を受け取り、探索結果を返す（同期）
//! - `EngineService`: 専用スレッドで `Engine` を動かし、チャネル越しに要求を受ける
//!
//! 置換表はリクエスト間で共有し、前回の探索結果を再利用する。

mod config;
mod service;

use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::position::Board;
use crate::record::Record;
use crate::search::{Search, SearchLimits, SearchResult};
use crate::tt::TranspositionTable;
use crate::types::json::AnalysisJson;

pub use config::EngineConfig;
pub use service::{EngineService, ServiceOutcome, ServiceReply};

/// 解析する局面の指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// 盤面を直接指定
    Board(Board),
    /// 棋譜のバイト列（`ply` 手目まで進めた局面。None なら最終局面）
    Record { bytes: Vec<u8>, ply: Option<usize> },
}

impl From<Board> for Position {
    fn from(board: Board) -> Self {
        Position::Board(board)
    }
}

/// 解析リクエスト
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub position: Position,
    pub limits: SearchLimits,
}

impl EngineRequest {
    pub fn new(position: impl Into<Position>, limits: SearchLimits) -> Self {
        Self {
            position: position.into(),
            limits,
        }
    }

    /// 棋譜の最終局面（または `ply` 手目）を解析する
    pub fn from_record(bytes: impl Into<Vec<u8>>, ply: Option<usize>, limits: SearchLimits) -> Self {
        Self {
            position: Position::Record {
                bytes: bytes.into(),
                ply,
            },
            limits,
        }
    }
}

/// 解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    /// 探索した局面
    pub board: Board,
    pub result: SearchResult,
}

impl EngineResponse {
    pub fn to_json(&self) -> AnalysisJson {
        AnalysisJson {
            board: self.board.into(),
            report: self.result.to_json(),
        }
    }
}

/// 解析エンジン
pub struct Engine {
    config: EngineConfig,
    search: Search,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let config = config.normalized();
        let tt = Arc::new(TranspositionTable::new(config.hash_mb));
        Self::with_tt(config, tt)
    }

    /// 既存の置換表を使って作成
    pub fn with_tt(config: EngineConfig, tt: Arc<TranspositionTable>) -> Self {
        let config = config.normalized();
        let search = Search::new(tt, config.eval)
            .with_threads(config.threads)
            .with_exact_root_scores(config.exact_root_scores);
        Self { config, search }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tt(&self) -> &Arc<TranspositionTable> {
        self.search.tt()
    }

    /// 置換表を空にする（新しい対局の開始時など）
    pub fn clear_hash(&self) {
        self.search.tt().clear();
    }

    /// 指定された局面を得る
    pub fn resolve(&self, position: &Position) -> Result<Board> {
        match position {
            Position::Board(board) => {
                board.validate()?;
                Ok(*board)
            }
            Position::Record { bytes, ply } => {
                let record = Record::parse(bytes)?;
                match ply {
                    Some(ply) => record.position_after(*ply),
                    None => record.final_board(),
                }
            }
        }
    }

    /// 局面を解析する
    ///
    /// 制限が1つも指定されていなければ `default_depth` まで探索する。
    pub fn analyze(&self, request: &EngineRequest) -> Result<EngineResponse> {
        let board = self.resolve(&request.position)?;
        let mut limits = request.limits.clone();
        if limits.depth.is_none() && limits.time.is_none() && limits.nodes.is_none() {
            limits.depth = Some(self.config.default_depth);
        }
        debug!("analyze: {limits:?}");
        let result = self.search.run(&board, &limits)?;
        Ok(EngineResponse { board, result })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
