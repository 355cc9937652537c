//! Alpha-Beta探索の実装
//!
//! negamax 形式の fail-soft Alpha-Beta 探索。
//! - 各ノードの順序: 中断判定 → 終局判定 → 深さ0で静的評価 → 置換表カットオフ → 確定石カットオフ → 子ノード
//! - 確定石カットオフは残り深さが空きマス数以上（葉がすべて終局）のときだけ使う
//! - パスは深さを消費しない
//! - 中断した部分木の値は置換表に書き込まない（`None` を返して伝播する）

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::eval::Evaluator;
use crate::movegen::{flips, legal_moves_bb, stable_discs};
use crate::position::Board;
use crate::tt::TranspositionTable;
use crate::types::{Bound, Depth, Move, Value};

use super::ordering::OrderedMoves;
#[cfg(feature = "search-stats")]
use super::stats::SearchStats;
use super::stats::{inc_stat, inc_stat_by_depth};
use super::types::{Candidate, StopReason};

/// 時間制限を確認する間隔（ノード数、2の冪）
const TIME_CHECK_INTERVAL: u64 = 256;

// =============================================================================
// 探索制御（全スレッドで共有）
// =============================================================================

pub(super) struct SearchControl {
    /// 呼び出し側の停止フラグ
    pub external: Option<Arc<AtomicBool>>,
    /// メインスレッド終了時に補助スレッドを止める
    pub helpers_stop: AtomicBool,
    pub deadline: Option<Instant>,
    pub node_limit: Option<u64>,
}

impl SearchControl {
    #[inline]
    fn external_stop(&self) -> bool {
        self.external
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// ルートの1反復分の結果
#[derive(Debug, Clone)]
pub(super) struct RootOutcome {
    pub best_move: Move,
    pub score: Value,
    /// 評価値の降順
    pub candidates: Vec<Candidate>,
}

// =============================================================================
// 探索ワーカー
// =============================================================================

/// 1スレッド分の探索状態
pub(super) struct SearchWorker<'a> {
    tt: &'a TranspositionTable,
    evaluator: Evaluator,
    control: &'a SearchControl,
    /// メインスレッドだけが時間・ノード数制限を見る
    is_main: bool,
    /// ルート以外の手順の回転量（補助スレッドの探索順をずらす）
    rotate: usize,
    pub nodes: u64,
    abort_enabled: bool,
    aborted: Option<StopReason>,
    #[cfg(feature = "search-stats")]
    pub stats: SearchStats,
}

impl<'a> SearchWorker<'a> {
    pub fn new(
        tt: &'a TranspositionTable,
        evaluator: Evaluator,
        control: &'a SearchControl,
        is_main: bool,
        rotate: usize,
    ) -> Self {
        Self {
            tt,
            evaluator,
            control,
            is_main,
            rotate,
            nodes: 0,
            abort_enabled: false,
            aborted: None,
            #[cfg(feature = "search-stats")]
            stats: SearchStats::default(),
        }
    }

    /// 中断判定を有効/無効にする（深さ1の反復では無効にする）
    pub fn set_abort_enabled(&mut self, enabled: bool) {
        self.abort_enabled = enabled;
    }

    /// 中断した理由
    pub fn aborted(&self) -> Option<StopReason> {
        self.aborted
    }

    /// 制限に達しているか（中断判定の有効/無効に関係なく確認する）
    pub fn poll_stop(&self) -> Option<StopReason> {
        if self.control.external_stop() {
            return Some(StopReason::Stopped);
        }
        if !self.is_main {
            return self
                .control
                .helpers_stop
                .load(Ordering::Relaxed)
                .then_some(StopReason::Stopped);
        }
        if self.control.node_limit.is_some_and(|limit| self.nodes >= limit) {
            return Some(StopReason::Nodes);
        }
        if self.control.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(StopReason::Time);
        }
        None
    }

    #[inline]
    fn check_abort(&mut self) -> bool {
        if self.aborted.is_some() {
            return true;
        }
        if !self.abort_enabled {
            return false;
        }
        // 時刻の取得は間引く
        let reason = if self.is_main
            && self.control.deadline.is_some()
            && self.nodes & (TIME_CHECK_INTERVAL - 1) != 0
            && !self.control.external_stop()
            && !self.control.node_limit.is_some_and(|limit| self.nodes >= limit)
        {
            None
        } else {
            self.poll_stop()
        };
        self.aborted = reason;
        reason.is_some()
    }

    /// ルート局面の探索
    ///
    /// `exact_root_scores` が真なら各手を全幅の窓で探索し、全候補手の正確な評価値を得る。
    /// 偽なら通常の Alpha-Beta で、最善手以外の候補は上界（`Bound::Upper`）になり得る。
    pub fn search_root(
        &mut self,
        board: &Board,
        depth: Depth,
        prev_best: Move,
        exact_root_scores: bool,
    ) -> Option<RootOutcome> {
        self.nodes += 1;
        let moves = board.legal_moves_bb();

        if moves.is_empty() {
            // パスのみ（終局局面は呼び出し側で処理済み）
            let score = -self.negamax(&board.pass(), depth, -Value::INFINITE, Value::INFINITE)?;
            self.tt.store(board, depth, score, Bound::Exact, Move::PASS);
            return Some(RootOutcome {
                best_move: Move::PASS,
                score,
                candidates: vec![Candidate {
                    mv: Move::PASS,
                    score,
                    bound: Bound::Exact,
                }],
            });
        }

        let ordered = OrderedMoves::new(moves, prev_best, self.rotate);
        let (player, opponent) = (board.player(), board.opponent());
        let mut alpha = -Value::INFINITE;
        let beta = Value::INFINITE;
        let mut best = -Value::INFINITE;
        let mut best_move = Move::NONE;
        let mut candidates = Vec::with_capacity(ordered.as_slice().len());

        for &sq in ordered.as_slice() {
            let child = board.play(sq, flips(player, opponent, sq));
            let lower = if exact_root_scores { -Value::INFINITE } else { alpha };
            let score = -self.negamax(&child, depth - 1, -beta, -lower)?;
            let bound = if score > lower { Bound::Exact } else { Bound::Upper };
            candidates.push(Candidate {
                mv: Move::from_square(sq),
                score,
                bound,
            });
            if score > best {
                best = score;
                best_move = Move::from_square(sq);
            }
            if score > alpha {
                alpha = score;
            }
        }

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        self.tt.store(board, depth, best, Bound::Exact, best_move);
        Some(RootOutcome {
            best_move,
            score: best,
            candidates,
        })
    }

    /// 確定石から最終石差の範囲を求め、窓の外に出ていればその境界を返す
    ///
    /// 残り深さが空きマス数未満だと葉に静的評価が混ざるため使わない。
    fn stability_cutoff(&self, board: &Board, depth: Depth, alpha: Value, beta: Value) -> Option<Value> {
        let empties = board.empty_count() as Depth;
        if depth < empties {
            return None;
        }
        let (player, opponent) = (board.player(), board.opponent());
        // 相手の確定石は手番側の石になり得ない
        let upper = Value::from_disc_difference(64 - 2 * stable_discs(opponent, player).count() as i32);
        if upper <= alpha {
            return Some(upper);
        }
        let lower = Value::from_disc_difference(2 * stable_discs(player, opponent).count() as i32 - 64);
        if lower >= beta {
            return Some(lower);
        }
        None
    }

    /// negamax（fail-soft）
    ///
    /// 中断した場合は None を返す。
    fn negamax(&mut self, board: &Board, depth: Depth, mut alpha: Value, beta: Value) -> Option<Value> {
        self.nodes += 1;
        inc_stat_by_depth!(self, nodes_by_depth, depth);
        if self.check_abort() {
            return None;
        }

        let (player, opponent) = (board.player(), board.opponent());
        let moves = legal_moves_bb(player, opponent);
        if moves.is_empty() && legal_moves_bb(opponent, player).is_empty() {
            inc_stat!(self, terminal_nodes);
            return Some(Value::from_disc_difference(board.disc_difference()));
        }

        if depth <= 0 {
            return Some(self.evaluator.evaluate(board));
        }

        inc_stat!(self, tt_probe);
        let tt_move = match self.tt.probe(board) {
            Some(data) => {
                if data.depth >= depth && data.bound.can_cutoff(data.value, alpha, beta) {
                    inc_stat!(self, tt_cutoff);
                    return Some(data.value);
                }
                data.best_move
            }
            None => Move::NONE,
        };

        if let Some(score) = self.stability_cutoff(board, depth, alpha, beta) {
            inc_stat!(self, stability_cutoff);
            return Some(score);
        }

        if moves.is_empty() {
            // 強制パス: 深さを減らさずに相手番を探索
            inc_stat!(self, pass_nodes);
            let score = -self.negamax(&board.pass(), depth, -beta, -alpha)?;
            self.tt.store(board, depth, score, Bound::classify(score, alpha, beta), Move::PASS);
            return Some(score);
        }

        let original_alpha = alpha;
        let mut best = -Value::INFINITE;
        let mut best_move = Move::NONE;
        let ordered = OrderedMoves::new(moves, tt_move, self.rotate);

        for (i, &sq) in ordered.as_slice().iter().enumerate() {
            let child = board.play(sq, flips(player, opponent, sq));
            let score = -self.negamax(&child, depth - 1, -beta, -alpha)?;
            if score > best {
                best = score;
                best_move = Move::from_square(sq);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                inc_stat!(self, beta_cutoff);
                if i == 0 {
                    inc_stat!(self, first_move_cutoff);
                }
                break;
            }
        }

        let bound = Bound::classify(best, original_alpha, beta);
        self.tt.store(board, depth, best, bound, best_move);
        Some(best)
    }
}
