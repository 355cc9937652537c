//! `sensei replay`: 棋譜の再生と整形

use std::path::PathBuf;

use anyhow::{Context, Result};
use sensei_core::Record;

use crate::io::{open_writer, read_input};

#[derive(clap::Args, Debug)]
pub struct ReplayArgs {
    /// 棋譜ファイル（`-` で標準入力、`.gz` は展開する）
    pub file: PathBuf,

    /// 整形した棋譜の出力先（`.gz` は圧縮する）
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// 再生結果を JSON で出力する
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let bytes = read_input(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let record = Record::parse(&bytes)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if let Some(path) = &args.out {
        use std::io::Write;
        let mut writer = open_writer(Some(path))
            .with_context(|| format!("failed to create {}", path.display()))?;
        writer.write_all(record.to_text().as_bytes())?;
        writer.close()?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record.replay_json()?)?);
    } else {
        let replay = record.replay()?;
        let moves: Vec<String> = replay.moves.iter().map(|m| m.to_string()).collect();
        println!("{}", moves.join(" "));
        println!("{}", replay.final_board());
    }
    Ok(())
}
