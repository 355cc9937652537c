//! 探索の統合テスト

use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sensei_core::eval::{EvalParams, evaluate};
use sensei_core::search::StopReason;
use sensei_core::tt::TranspositionTable;
use sensei_core::types::MAX_DEPTH;
use sensei_core::{Board, Move, Search, SearchLimits, Value};

fn search(params: EvalParams) -> Search {
    Search::new(Arc::new(TranspositionTable::new(4)), params)
}

/// 置換表を使わない素朴な negamax
fn minimax(board: &Board, depth: i32, params: &EvalParams) -> i32 {
    if board.is_terminal() {
        return Value::from_disc_difference(board.disc_difference()).raw();
    }
    if depth == 0 {
        return evaluate(board, params).raw();
    }
    if board.must_pass() {
        return -minimax(&board.apply(Move::PASS).unwrap(), depth, params);
    }
    board
        .legal_moves()
        .map(|mv| -minimax(&board.apply(mv).unwrap(), depth - 1, params))
        .max()
        .unwrap()
}

/// シードからランダムに `plies` 手進めた局面（終局したらそこで止める）
fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut board = Board::initial();
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let mv = if board.must_pass() {
            Move::PASS
        } else {
            let legal: Vec<Move> = board.legal_moves().collect();
            legal[(rng.next_u64() % legal.len() as u64) as usize]
        };
        board = board.apply(mv).unwrap();
    }
    board
}

#[test]
fn test_opening_depth1_baseline_candidates() {
    let result = search(EvalParams::baseline())
        .run(&Board::initial(), &SearchLimits::depth(1))
        .unwrap();
    assert_eq!(result.candidates.len(), 4);
    let mut moves: Vec<String> = result.candidates.iter().map(|c| c.mv.to_string()).collect();
    moves.sort();
    assert_eq!(moves, vec!["c4", "d3", "e6", "f5"]);
    assert!(result.candidates.iter().all(|c| c.score == result.candidates[0].score));
}

#[test]
fn test_search_matches_minimax_on_random_positions() {
    let params = EvalParams::default();
    for seed in 0..6 {
        let board = random_position(seed, 20);
        if board.is_terminal() {
            continue;
        }
        for depth in 1..=3 {
            let result = search(params).run(&board, &SearchLimits::depth(depth)).unwrap();
            assert_eq!(
                result.score.raw(),
                minimax(&board, depth, &params),
                "seed {seed} depth {depth}"
            );
        }
    }
}

/// 深さ d で証明された勝敗は d+1 でも同符号の確定値のまま
#[test]
fn test_proven_scores_survive_deeper_search() {
    let params = EvalParams::default();
    // 黒 a1・白 b1 の黒番。c1 で白が全滅するので深さ1から確定勝ち
    let wipeout: Board = format!("XO{}X", "-".repeat(62)).parse().unwrap();
    let mut boards = vec![wipeout];
    boards.extend(
        (30..36)
            .map(|seed| random_position(seed, 52))
            .filter(|b| !b.is_terminal()),
    );

    let mut proven_transitions = 0;
    for (i, board) in boards.iter().enumerate() {
        let empties = board.empty_count() as i32;
        let exact = minimax(board, 60, &params);
        let mut previous: Option<Value> = None;
        for depth in 1..=(empties + 1).min(MAX_DEPTH) {
            let score = search(params).run(board, &SearchLimits::depth(depth)).unwrap().score;
            if let Some(prev) = previous {
                if let Some(discs) = prev.disc_difference().filter(|&d| d != 0) {
                    assert!(score.is_terminal(), "board {i} depth {depth}: {score:?}");
                    assert_eq!(
                        score.raw().signum(),
                        discs.signum(),
                        "board {i} depth {depth}"
                    );
                    proven_transitions += 1;
                }
            }
            if depth >= empties {
                assert_eq!(score.raw(), exact, "board {i} depth {depth}");
            }
            previous = Some(score);
        }
    }
    assert!(proven_transitions > 0);
}

#[test]
fn test_terminal_board_scores_exactly_at_any_depth() {
    let board: Board = format!("{}{}X", "X".repeat(40), "O".repeat(24)).parse().unwrap();
    assert!(board.is_terminal());
    for depth in [1, 5, 60] {
        let result = search(EvalParams::default())
            .run(&board, &SearchLimits::depth(depth))
            .unwrap();
        assert_eq!(result.score, Value::from_disc_difference(16));
        assert_eq!(result.final_discs(), Some(16));
        assert_eq!(result.stop_reason, StopReason::Terminal);
    }
}

#[test]
fn test_endgame_solve_is_exact() {
    let board = random_position(7, 54);
    if board.is_terminal() {
        return;
    }
    let empties = board.empty_count() as i32;
    let params = EvalParams::default();
    let result = search(params).run(&board, &SearchLimits::default()).unwrap();
    assert_eq!(result.stop_reason, StopReason::Solved);
    assert!(result.depth >= empties);
    assert_eq!(result.score.raw(), minimax(&board, 60, &params));
    assert!(result.score.is_terminal() || result.score == Value::ZERO);
}

#[test]
fn test_lazy_smp_reports_same_score() {
    let board = random_position(3, 24);
    let params = EvalParams::default();
    let single = search(params).run(&board, &SearchLimits::depth(5)).unwrap();
    let parallel = search(params)
        .with_threads(4)
        .run(&board, &SearchLimits::depth(5))
        .unwrap();
    assert_eq!(single.score, parallel.score);
    assert_eq!(parallel.depth, 5);
}

#[test]
fn test_pv_is_legal_sequence() {
    let board = random_position(5, 30);
    let result = search(EvalParams::default())
        .run(&board, &SearchLimits::depth(6))
        .unwrap();
    assert_eq!(result.pv.first().copied(), result.best_move);
    let mut current = board;
    for mv in &result.pv {
        current = current.apply(*mv).unwrap();
    }
}
