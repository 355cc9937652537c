//! 反復深化と Lazy SMP

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};

use crate::error::Result;
use crate::eval::{EvalParams, Evaluator};
use crate::position::Board;
use crate::tt::TranspositionTable;
use crate::types::{Bound, Depth, MAX_DEPTH, MAX_PLY, Move, Value};

use super::alpha_beta::{RootOutcome, SearchControl, SearchWorker};
#[cfg(feature = "search-stats")]
use super::stats::SearchStats;
use super::types::{Candidate, SearchResult, StopReason};
use super::SearchLimits;

/// 1スレッド分の反復深化の結果
struct IterationSummary {
    completed: Option<(Depth, RootOutcome)>,
    stop_reason: StopReason,
    nodes: u64,
    #[cfg(feature = "search-stats")]
    stats: SearchStats,
}

impl IterationSummary {
    /// 補助スレッドの集計を取り込み、そのノード数を返す
    fn absorb_helper(&mut self, helper: &IterationSummary) -> u64 {
        #[cfg(feature = "search-stats")]
        self.stats.merge(&helper.stats);
        helper.nodes
    }
}

/// 探索エンジン
///
/// 置換表は `Arc` で共有し、複数回の探索やエンジンのリクエスト間で再利用する。
#[derive(Clone)]
pub struct Search {
    tt: Arc<TranspositionTable>,
    evaluator: Evaluator,
    threads: usize,
    exact_root_scores: bool,
}

impl Search {
    /// 1スレッド、ルート候補手の評価値を正確に求める設定で作成
    pub fn new(tt: Arc<TranspositionTable>, params: EvalParams) -> Self {
        Self {
            tt,
            evaluator: Evaluator::new(params),
            threads: 1,
            exact_root_scores: true,
        }
    }

    /// 探索スレッド数（1以上に丸める）
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// ルートの全候補手を全幅の窓で探索するか
    pub fn with_exact_root_scores(mut self, exact: bool) -> Self {
        self.exact_root_scores = exact;
        self
    }

    pub fn tt(&self) -> &Arc<TranspositionTable> {
        &self.tt
    }

    /// 局面を探索する
    ///
    /// 盤面が不正なら探索前に `InvalidBoard` を返す。制限に達した場合は
    /// 完了した最も深い反復の結果を返す（深さ1は必ず完了する）。
    pub fn run(&self, board: &Board, limits: &SearchLimits) -> Result<SearchResult> {
        board.validate()?;
        let start = Instant::now();

        if board.is_terminal() {
            return Ok(SearchResult {
                best_move: None,
                score: Value::from_disc_difference(board.disc_difference()),
                depth: 0,
                nodes: 1,
                candidates: Vec::new(),
                pv: Vec::new(),
                elapsed: start.elapsed(),
                stop_reason: StopReason::Terminal,
            });
        }

        self.tt.new_search();
        let control = SearchControl {
            external: limits.stop_flag.clone(),
            helpers_stop: AtomicBool::new(false),
            deadline: limits.time.map(|t| start + t),
            node_limit: limits.nodes,
        };
        let max_depth = limits.depth.unwrap_or(MAX_DEPTH).clamp(1, MAX_DEPTH);

        let (main, helper_nodes) = std::thread::scope(|scope| {
            let control = &control;
            let helpers: Vec<_> = (1..self.threads)
                .map(|id| scope.spawn(move || self.iterate(board, max_depth, control, id)))
                .collect();

            let mut main = self.iterate(board, max_depth, control, 0);
            control.helpers_stop.store(true, Ordering::Relaxed);

            let mut helper_nodes = 0;
            for handle in helpers {
                match handle.join() {
                    Ok(summary) => helper_nodes += main.absorb_helper(&summary),
                    Err(_) => debug!("search helper thread panicked"),
                }
            }
            (main, helper_nodes)
        });

        // 全スレッド合算
        #[cfg(feature = "search-stats")]
        debug!("search stats ({} threads):\n{}", self.threads, main.stats.format_report());

        let (depth, outcome) = match main.completed {
            Some(completed) => completed,
            None => (1, self.fallback_outcome(board)),
        };
        let best_move = outcome.best_move;
        let pv = self.extract_pv(board, best_move);
        let result = SearchResult {
            best_move: Some(best_move),
            score: outcome.score,
            depth,
            nodes: main.nodes + helper_nodes,
            candidates: outcome.candidates,
            pv,
            elapsed: start.elapsed(),
            stop_reason: main.stop_reason,
        };
        info!(
            "search done: best={} score={} depth={} nodes={} reason={} time={}ms",
            best_move,
            result.score,
            result.depth,
            result.nodes,
            result.stop_reason,
            result.elapsed.as_millis()
        );
        Ok(result)
    }

    /// 反復深化（id 0 がメインスレッド）
    fn iterate(
        &self,
        board: &Board,
        max_depth: Depth,
        control: &SearchControl,
        id: usize,
    ) -> IterationSummary {
        let is_main = id == 0;
        let mut worker = SearchWorker::new(&self.tt, self.evaluator, control, is_main, id);
        let empties = board.empty_count() as Depth;
        let mut completed: Option<(Depth, RootOutcome)> = None;
        let mut prev_best = Move::NONE;
        let mut stop_reason = StopReason::Depth;

        // 補助スレッドは奇数番目が1手深い反復から始める
        let first_depth = if is_main { 1 } else { (1 + (id % 2) as Depth).min(max_depth) };

        for depth in first_depth..=max_depth {
            worker.set_abort_enabled(depth > 1);
            match worker.search_root(board, depth, prev_best, self.exact_root_scores) {
                Some(outcome) => {
                    if is_main {
                        debug!(
                            "depth {depth}: best={} score={} nodes={}",
                            outcome.best_move, outcome.score, worker.nodes
                        );
                    }
                    prev_best = outcome.best_move;
                    completed = Some((depth, outcome));
                }
                None => {
                    stop_reason = worker.aborted().unwrap_or(StopReason::Stopped);
                    break;
                }
            }
            if depth >= empties {
                stop_reason = StopReason::Solved;
                break;
            }
            if let Some(reason) = worker.poll_stop() {
                stop_reason = reason;
                break;
            }
        }

        IterationSummary {
            completed,
            stop_reason,
            nodes: worker.nodes,
            #[cfg(feature = "search-stats")]
            stats: worker.stats.clone(),
        }
    }

    /// 反復が1つも完了しなかった場合の結果（先頭の合法手を静的評価で返す）
    fn fallback_outcome(&self, board: &Board) -> RootOutcome {
        let mv = board.legal_moves().next().unwrap_or(Move::PASS);
        let child = board.apply(mv).unwrap_or(*board);
        let score = -self.evaluator.evaluate(&child);
        RootOutcome {
            best_move: mv,
            score,
            candidates: vec![Candidate {
                mv,
                score,
                bound: Bound::Exact,
            }],
        }
    }

    /// 置換表の最善手をたどって読み筋を復元する
    fn extract_pv(&self, board: &Board, first: Move) -> Vec<Move> {
        let mut pv = vec![first];
        let Ok(mut current) = board.apply(first) else {
            return pv;
        };
        while pv.len() < MAX_PLY && !current.is_terminal() {
            let Some(data) = self.tt.probe(&current) else {
                break;
            };
            let mv = data.best_move;
            if !current.is_legal(mv) {
                break;
            }
            match current.apply(mv) {
                Ok(next) => current = next,
                Err(_) => break,
            }
            pv.push(mv);
        }
        pv
    }
}
