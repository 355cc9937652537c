//! `sensei selfplay`: エンジン同士の自己対局

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sensei_core::record::RecordMetadata;
use sensei_core::{Board, Color, Engine, EngineRequest, Move, Record, SearchLimits};

use crate::config::EngineArgs;
use crate::io::open_writer;

#[derive(clap::Args, Debug)]
pub struct SelfplayArgs {
    /// 対局数
    #[arg(long, default_value_t = 1)]
    pub games: u32,

    /// 1手あたりの探索深さ
    #[arg(long, default_value_t = 4)]
    pub depth: i32,

    /// 序盤にランダムに打つ手数
    #[arg(long = "random-plies", default_value_t = 4)]
    pub random_plies: u32,

    /// 乱数シード
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// 棋譜の出力先ディレクトリ（`game-0001.txt` … を作る。省略時は標準出力）
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// 出力を gzip 圧縮する
    #[arg(long)]
    pub gzip: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// 1局を指し、パスを除いた着手列を返す
fn play_game(engine: &Engine, args: &SelfplayArgs, rng: &mut Xoshiro256PlusPlus) -> Result<Vec<Move>> {
    let mut board = Board::initial();
    let mut moves = Vec::new();
    let mut placed = 0u32;
    while !board.is_terminal() {
        if board.must_pass() {
            board = board.apply(Move::PASS)?;
            continue;
        }
        let mv = if placed < args.random_plies {
            let legal: Vec<Move> = board.legal_moves().collect();
            legal[(rng.next_u64() % legal.len() as u64) as usize]
        } else {
            let request = EngineRequest::new(board, SearchLimits::depth(args.depth));
            let response = engine.analyze(&request)?;
            response
                .result
                .best_move
                .context("engine returned no move for a live position")?
        };
        board = board.apply(mv)?;
        moves.push(mv);
        placed += 1;
    }
    Ok(moves)
}

pub fn run(args: &SelfplayArgs) -> Result<()> {
    let engine = Engine::new(args.engine.resolve()?);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let year = chrono::Local::now().year();

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let (mut black_wins, mut white_wins, mut draws) = (0u32, 0u32, 0u32);
    for game in 1..=args.games {
        engine.clear_hash();
        let moves = play_game(&engine, args, &mut rng)?;
        let record = Record::new(None, moves)?;
        let final_board = record.final_board()?;
        let black = final_board.discs(Color::Black);
        let white = final_board.discs(Color::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => black_wins += 1,
            std::cmp::Ordering::Less => white_wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
        }
        log::info!("game {game}: {black}-{white} in {} moves", record.moves().len());

        let record = record.with_metadata(RecordMetadata {
            black: Some("sensei".to_string()),
            white: Some("sensei".to_string()),
            tournament: Some("selfplay".to_string()),
            year: Some(year),
            black_discs: Some(black),
            white_discs: Some(white),
            notes: Some(format!("seed {} game {game} depth {}", args.seed, args.depth)),
        });

        let path = args.out_dir.as_ref().map(|dir| {
            let ext = if args.gzip { "txt.gz" } else { "txt" };
            dir.join(format!("game-{game:04}.{ext}"))
        });
        let mut writer = open_writer(path.as_deref()).context("failed to open output")?;
        writer.write_all(record.to_text().as_bytes())?;
        if path.is_none() {
            writer.write_all(b"\n")?;
        }
        writer.close()?;
    }

    eprintln!(
        "games {} black {black_wins} white {white_wins} draw {draws}",
        args.games
    );
    Ok(())
}
