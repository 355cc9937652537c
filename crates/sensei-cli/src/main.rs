//! Othello Sensei のコマンドラインホスト
//!
//! 使い方:
//!   # 棋譜の最終局面を深さ12で解析
//!   sensei analyze game.txt --depth 12
//!
//!   # 盤面を直接指定して JSON 出力
//!   sensei analyze --position "$(cat board.txt)" --json
//!
//!   # 自己対局
//!   sensei selfplay --games 10 --depth 6 --out-dir runs/selfplay
//!
//!   # 合法手生成の検証
//!   sensei perft --depth 8

mod analyze;
mod config;
mod io;
mod perft;
mod replay;
mod selfplay;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sensei", version, about = "Othello analysis engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 局面または棋譜を解析する
    Analyze(analyze::AnalyzeArgs),
    /// 棋譜を再生して最終局面を表示する
    Replay(replay::ReplayArgs),
    /// 自己対局で棋譜を生成する
    Selfplay(selfplay::SelfplayArgs),
    /// perft（合法手生成のノード数）を計測する
    Perft(perft::PerftArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Analyze(args) => analyze::run(args),
        Command::Replay(args) => replay::run(args),
        Command::Selfplay(args) => selfplay::run(args),
        Command::Perft(args) => perft::run(args),
    }
}
