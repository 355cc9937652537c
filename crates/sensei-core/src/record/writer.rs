//! 棋譜の書き出し

use std::fmt::Write;

use super::Record;

/// 値の改行を空白に置き換える（1行1項目を保つ）
fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 棋譜テキストを生成する
///
/// 開始局面の指定があれば盤面を先頭に置き、続けて空白区切りの指し手、
/// 最後に対局情報を `Key: value` 行で出力する。
pub(super) fn write(record: &Record) -> String {
    let mut out = String::new();
    if let Some(board) = record.board_override() {
        // Display は手番記号で終わる
        let _ = writeln!(out, "{board}");
    }

    let moves: Vec<String> = record.moves().iter().map(|m| m.to_string()).collect();
    if !moves.is_empty() {
        out.push_str(&moves.join(" "));
        out.push('\n');
    }

    let meta = record.metadata();
    let text_fields = [
        ("Black", &meta.black),
        ("White", &meta.white),
        ("Tournament", &meta.tournament),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{key}: {}", single_line(value));
        }
    }
    if let Some(year) = meta.year {
        let _ = writeln!(out, "Year: {year}");
    }
    if let Some(discs) = meta.black_discs {
        let _ = writeln!(out, "Black disks: {discs}");
    }
    if let Some(discs) = meta.white_discs {
        let _ = writeln!(out, "White disks: {discs}");
    }
    if let Some(notes) = &meta.notes {
        let _ = writeln!(out, "Notes: {}", single_line(notes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Board;
    use crate::record::RecordMetadata;
    use crate::types::Move;

    fn moves(s: &[&str]) -> Vec<Move> {
        s.iter().map(|m| m.parse().unwrap()).collect()
    }

    #[test]
    fn test_write_moves_only() {
        let record = Record::new(None, moves(&["f5", "d6", "c3"])).unwrap();
        assert_eq!(write(&record), "f5 d6 c3\n");
    }

    #[test]
    fn test_write_empty_record() {
        let record = Record::new(None, Vec::new()).unwrap();
        assert_eq!(write(&record), "");
        assert_eq!(Record::parse(write(&record).as_bytes()).unwrap(), record);
    }

    #[test]
    fn test_write_with_board_and_metadata() {
        let start: Board = format!("XO{}O", "-".repeat(62)).parse().unwrap();
        let record = Record::new(Some(start), moves(&["c1"]))
            .unwrap()
            .with_metadata(RecordMetadata {
                black: Some("Alice".to_string()),
                white: Some("Bob".to_string()),
                year: Some(2024),
                black_discs: Some(3),
                notes: Some("first line\nsecond line".to_string()),
                ..RecordMetadata::default()
            });
        let text = write(&record);
        assert!(text.starts_with("XO------\n"));
        assert!(text.contains("\nc1\n"));
        assert!(text.contains("Notes: first line second line\n"));

        let parsed = Record::parse(text.as_bytes()).unwrap();
        assert_eq!(parsed.moves(), record.moves());
        assert_eq!(parsed.board_override(), record.board_override());
        assert_eq!(parsed.metadata().black.as_deref(), Some("Alice"));
        assert_eq!(parsed.metadata().year, Some(2024));
        assert_eq!(parsed.metadata().notes.as_deref(), Some("first line second line"));
    }

    #[test]
    fn test_write_roundtrip_with_pass() {
        let start: Board = format!("XO{}O", "-".repeat(62)).parse().unwrap();
        let record = Record::new(Some(start), vec![Move::PASS, "c1".parse().unwrap()]).unwrap();
        let parsed = Record::parse(write(&record).as_bytes()).unwrap();
        assert_eq!(parsed, record);
    }
}
