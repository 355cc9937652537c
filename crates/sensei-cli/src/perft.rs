//! `sensei perft`: 合法手生成の検証

use anyhow::{Context, Result};
use sensei_core::Board;
use sensei_core::movegen::perft;

#[derive(clap::Args, Debug)]
pub struct PerftArgs {
    /// 最大深さ
    #[arg(long, default_value_t = 6)]
    pub depth: u32,

    /// 開始局面（省略時は初期局面）
    #[arg(long)]
    pub position: Option<String>,
}

pub fn run(args: &PerftArgs) -> Result<()> {
    let board = match &args.position {
        Some(text) => text.parse::<Board>().context("invalid --position")?,
        None => Board::initial(),
    };
    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        let nodes = perft(&board, depth);
        log::info!("perft {depth} took {}ms", start.elapsed().as_millis());
        println!("perft {depth} {nodes}");
    }
    Ok(())
}
