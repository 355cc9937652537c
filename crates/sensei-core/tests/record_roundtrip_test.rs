//! 棋譜の書き出しと再解析

use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sensei_core::record::RecordMetadata;
use sensei_core::{Board, Color, Move, Record, SenseiError};

/// ランダム対局の着手列（パスは記録しない）と全局面
fn random_game(seed: u64, max_plies: usize) -> (Vec<Move>, Vec<Board>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut board = Board::initial();
    let mut moves = Vec::new();
    let mut boards = vec![board];
    while !board.is_terminal() && moves.len() < max_plies {
        if board.must_pass() {
            board = board.apply(Move::PASS).unwrap();
            boards.push(board);
            continue;
        }
        let legal: Vec<Move> = board.legal_moves().collect();
        let mv = legal[(rng.next_u64() % legal.len() as u64) as usize];
        board = board.apply(mv).unwrap();
        moves.push(mv);
        boards.push(board);
    }
    (moves, boards)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn prop_text_roundtrip_reproduces_boards(seed in any::<u64>(), max_plies in 0usize..64) {
        let (moves, boards) = random_game(seed, max_plies);
        let record = Record::new(None, moves.clone()).unwrap();
        let parsed = Record::parse(record.to_text().as_bytes()).unwrap();
        prop_assert_eq!(parsed.moves(), &moves[..]);
        let last = boards[boards.len() - 1];
        let expected = if last.is_terminal() {
            record.clone().with_metadata(RecordMetadata {
                black_discs: Some(last.discs(Color::Black)),
                ..RecordMetadata::default()
            })
        } else {
            record
        };
        prop_assert_eq!(&parsed, &expected);
        let replay = parsed.replay().unwrap();
        prop_assert_eq!(replay.boards, boards);
    }

    #[test]
    fn prop_concatenated_moves_parse(seed in any::<u64>()) {
        let (moves, _) = random_game(seed, 60);
        let text: String = moves.iter().map(|m| m.to_string().to_uppercase()).collect();
        let parsed = Record::parse(text.as_bytes()).unwrap();
        prop_assert_eq!(parsed.moves(), &moves[..]);
    }
}

#[test]
fn test_roundtrip_from_board_override_with_metadata() {
    let (moves, boards) = random_game(42, 20);
    let start = boards[boards.len() - 1];
    let (tail, _) = {
        let mut board = start;
        let mut tail = Vec::new();
        for _ in 0..6 {
            if board.is_terminal() {
                break;
            }
            let mv = if board.must_pass() {
                Move::PASS
            } else {
                board.legal_moves().next().unwrap()
            };
            board = board.apply(mv).unwrap();
            tail.push(mv);
        }
        (tail, board)
    };
    assert_eq!(moves.len(), 20);

    let record = Record::new(Some(start), tail)
        .unwrap()
        .with_metadata(RecordMetadata {
            black: Some("Black Player".to_string()),
            tournament: Some("Club Open".to_string()),
            year: Some(2026),
            black_discs: Some(40),
            white_discs: Some(24),
            ..RecordMetadata::default()
        });
    let parsed = Record::parse(record.to_text().as_bytes()).unwrap();
    assert_eq!(parsed, record);
    assert_eq!(parsed.start_board(), start);
    assert_eq!(parsed.final_board().unwrap(), record.final_board().unwrap());
}

#[test]
fn test_numbered_moves_with_metadata() {
    let text = b"1. f5 2. d6 3. c3 4. d3 5. c4\nBlack: c4d3\nWhite: Someone\nTournament: Local\nYear: 2019\nBlack disks: 35\nNotes: nice game\n";
    let record = Record::parse(text).unwrap();
    assert_eq!(record.moves().len(), 5);
    assert_eq!(record.metadata().black.as_deref(), Some("c4d3"));
    assert_eq!(record.metadata().black_discs, Some(35));
    assert_eq!(record.metadata().notes.as_deref(), Some("nice game"));
}

#[test]
fn test_errors_carry_offsets() {
    assert!(matches!(
        Record::parse(b"f5 d6 c3 j4"),
        Err(SenseiError::MalformedRecord { offset: 9, .. })
    ));
    assert!(matches!(
        Record::parse(b"f5d6c3a8"),
        Err(SenseiError::IllegalRecordedMove { index: 3, offset: Some(6), .. })
    ));
}
