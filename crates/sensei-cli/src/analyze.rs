//! `sensei analyze`: 局面・棋譜の解析

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use sensei_core::engine::Position;
use sensei_core::{Board, Engine, EngineRequest, EngineResponse, SearchLimits};

use crate::config::EngineArgs;
use crate::io::read_input;

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// 棋譜ファイル（`-` で標準入力、`.gz` は展開する）
    pub file: Option<PathBuf>,

    /// 盤面を直接指定（64マス + 手番記号）
    #[arg(long, conflicts_with = "file")]
    pub position: Option<String>,

    /// 棋譜の先頭から何手目の局面を解析するか（省略時は最終局面）
    #[arg(long, conflicts_with = "position")]
    pub ply: Option<usize>,

    /// 最大探索深さ
    #[arg(long)]
    pub depth: Option<i32>,

    /// 最大探索時間（ミリ秒）
    #[arg(long = "time-ms")]
    pub time_ms: Option<u64>,

    /// 最大ノード数
    #[arg(long)]
    pub nodes: Option<u64>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// JSON で出力する
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.depth,
            time: self.time_ms.map(Duration::from_millis),
            nodes: self.nodes,
            stop_flag: None,
        }
    }

    fn position(&self) -> Result<Position> {
        if let Some(text) = &self.position {
            let board: Board = text.parse().context("invalid --position")?;
            return Ok(Position::Board(board));
        }
        match &self.file {
            Some(path) => {
                let bytes = read_input(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(Position::Record {
                    bytes,
                    ply: self.ply,
                })
            }
            None => {
                if self.ply.is_some() {
                    bail!("--ply requires a record file");
                }
                Ok(Position::Board(Board::initial()))
            }
        }
    }
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = args.engine.resolve()?;
    let engine = Engine::new(config);
    let request = EngineRequest::new(args.position()?, args.limits());
    let response = engine.analyze(&request).context("analysis failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response.to_json())?);
    } else {
        print!("{}", format_report(&response));
    }
    Ok(())
}

/// 人が読む形式の解析結果
pub fn format_report(response: &EngineResponse) -> String {
    let result = &response.result;
    let mut out = String::new();
    out.push_str(&response.board.to_string());
    out.push('\n');
    match result.best_move {
        Some(mv) => out.push_str(&format!("bestmove {mv}\n")),
        None => out.push_str("bestmove none (game over)\n"),
    }
    out.push_str(&format!("score {}\n", result.score));
    if let Some(discs) = result.final_discs() {
        out.push_str(&format!("final {discs:+}\n"));
    }
    out.push_str(&format!(
        "depth {} nodes {} time {}ms stop {}\n",
        result.depth,
        result.nodes,
        result.elapsed.as_millis(),
        result.stop_reason
    ));
    if !result.pv.is_empty() {
        let pv: Vec<String> = result.pv.iter().map(|m| m.to_string()).collect();
        out.push_str(&format!("pv {}\n", pv.join(" ")));
    }
    for candidate in &result.candidates {
        out.push_str(&format!(
            "  {} {} ({:?})\n",
            candidate.mv, candidate.score, candidate.bound
        ));
    }
    out
}
