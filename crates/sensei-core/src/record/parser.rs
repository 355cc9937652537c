//! 棋譜の解析

use crate::error::{Result, SenseiError};
use crate::position::Board;
use crate::position::text::{is_cell_char, parse_cells};
use crate::types::{Color, Move, Square};

use super::{Record, RecordMetadata, replay};

fn malformed(offset: usize, reason: impl Into<String>) -> SenseiError {
    SenseiError::MalformedRecord {
        offset,
        reason: reason.into(),
    }
}

/// 解析位置つきの入力
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// 現在位置から行末まで
    fn rest_of_line(&self) -> &'a str {
        let rest = &self.text[self.pos..];
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// 現在行が `Key:` で始まるか
    fn at_metadata_line(&self) -> bool {
        let line = self.rest_of_line();
        let Some(colon) = line.find(':') else {
            return false;
        };
        let key = &line[..colon];
        key.starts_with(|c: char| c.is_ascii_alphabetic())
            && key.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
    }

    /// 文字のあとの数字1文字を読んで着手にする
    fn read_square(&mut self) -> Result<Move> {
        let file = self.bytes[self.pos].to_ascii_lowercase() - b'a';
        match self.peek_at(1) {
            Some(rank @ b'1'..=b'8') => {
                self.pos += 2;
                Square::from_file_rank(file, rank - b'1')
                    .map(Move::from_square)
                    .ok_or_else(|| malformed(self.pos - 2, "square out of range"))
            }
            _ => Err(malformed(self.pos + 1, "expected a rank digit 1-8")),
        }
    }

    /// `pass` または `pa`
    fn read_pass(&mut self) -> Result<Move> {
        let rest = &self.bytes[self.pos..];
        let len = if rest.len() >= 4 && rest[..4].eq_ignore_ascii_case(b"pass") {
            4
        } else if rest.len() >= 2 && rest[..2].eq_ignore_ascii_case(b"pa") {
            2
        } else {
            return Err(malformed(self.pos, "expected 'pass'"));
        };
        self.pos += len;
        Ok(Move::PASS)
    }

    /// `12.` のような手数表記なら読み飛ばして true
    fn skip_move_number(&mut self) -> bool {
        let digits = self.bytes[self.pos..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits > 0 && self.peek_at(digits) == Some(b'.') {
            self.pos += digits + 1;
            true
        } else {
            false
        }
    }
}

/// 棋譜を解析し、再生して合法性を確認する
pub(super) fn parse(bytes: &[u8]) -> Result<Record> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| malformed(e.valid_up_to(), "invalid UTF-8"))?;
    let start_pos = if text.starts_with('\u{feff}') { 3 } else { 0 };
    let mut cursor = Cursor::new(text, start_pos);

    // 開始局面
    cursor.skip_separators();
    let start = match cursor.peek() {
        Some(c) if is_cell_char(c) && !cursor.at_metadata_line() => {
            let cells = parse_cells(cursor.bytes, cursor.pos)
                .map_err(|(offset, reason)| malformed(offset, reason))?;
            cursor.pos = cells.end;
            Some(Board::from_bitboards(cells.black, cells.white, cells.side_to_move())?)
        }
        _ => None,
    };

    // 指し手
    let mut moves = Vec::new();
    let mut offsets = Vec::new();
    loop {
        cursor.skip_separators();
        let Some(c) = cursor.peek() else {
            break;
        };
        if c.is_ascii_alphabetic() && cursor.at_metadata_line() {
            break;
        }
        let offset = cursor.pos;
        let mv = match c {
            b'a'..=b'h' | b'A'..=b'H' => cursor.read_square()?,
            b'p' | b'P' => cursor.read_pass()?,
            b'0'..=b'9' if cursor.skip_move_number() => continue,
            _ => {
                return Err(malformed(
                    offset,
                    format!("unexpected character {:?}", text[offset..].chars().next().unwrap_or('?')),
                ));
            }
        };
        moves.push(mv);
        offsets.push(offset);
    }

    // 対局情報
    let metadata = parse_metadata(&mut cursor)?;

    let mut record = Record {
        start,
        moves,
        metadata,
        offsets,
    };
    let last = replay::replay(record.start_board(), &record.moves, &record.offsets)?.final_board();
    // 終局した棋譜で黒石数が未記入なら最終局面から補う
    if record.metadata.black_discs.is_none() && last.is_terminal() {
        record.metadata.black_discs = Some(last.discs(Color::Black));
    }
    Ok(record)
}

fn parse_number<T: std::str::FromStr>(value: &str, offset: usize, key: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| malformed(offset, format!("{key} must be a number, got {value:?}")))
}

fn parse_metadata(cursor: &mut Cursor<'_>) -> Result<RecordMetadata> {
    let mut metadata = RecordMetadata::default();
    loop {
        cursor.skip_separators();
        if cursor.peek().is_none() {
            break;
        }
        let line_start = cursor.pos;
        if !cursor.at_metadata_line() {
            return Err(malformed(line_start, "expected 'Key: value' line"));
        }
        let line = cursor.rest_of_line();
        cursor.pos += line.len();

        let Some((key, raw_value)) = line.split_once(':') else {
            return Err(malformed(line_start, "expected 'Key: value' line"));
        };
        let value_offset = line_start + key.len() + 1 + (raw_value.len() - raw_value.trim_start().len());
        let value = raw_value.trim();
        let text_value = || (!value.is_empty()).then(|| value.to_string());

        match key.trim().to_ascii_lowercase().as_str() {
            "black" => metadata.black = text_value(),
            "white" => metadata.white = text_value(),
            "tournament" => metadata.tournament = text_value(),
            "notes" => metadata.notes = text_value(),
            "year" => metadata.year = Some(parse_number(value, value_offset, "Year")?),
            "black disks" | "black discs" => {
                metadata.black_discs = Some(parse_number(value, value_offset, "Black disks")?)
            }
            "white disks" | "white discs" => {
                metadata.white_discs = Some(parse_number(value, value_offset, "White disks")?)
            }
            _ => {}
        }
    }
    Ok(metadata)
}
