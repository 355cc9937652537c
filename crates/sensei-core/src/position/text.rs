//! 盤面テキスト
//!
//! 8行×8文字（1段目が先頭、各行は a〜h）で `X`=黒、`O`=白、`-`=空き。
//! 読み込み時は `x`/`*` を黒、`o` を白、`.` を空きとしても受け付け、
//! マスの間の空白は無視する。64マスの後に手番記号（`X`/`O`）を置ける。
//! 手番記号がなければ空きマス数の偶奇で決める（偶数なら黒番）。

use std::fmt;
use std::str::FromStr;

use super::Board;
use crate::bitboard::Bitboard;
use crate::error::SenseiError;
use crate::types::json::BoardStateJson;
use crate::types::{Color, Square};

/// マス64個分の解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCells {
    pub black: Bitboard,
    pub white: Bitboard,
    /// 明示された手番（なければ None）
    pub side: Option<Color>,
    /// 解析を終えた位置（次に読むバイト）
    pub end: usize,
}

impl BoardCells {
    /// 手番記号がなければ空きマスの偶奇から手番を決める
    pub fn side_to_move(&self) -> Color {
        self.side.unwrap_or_else(|| {
            let empties = 64 - (self.black | self.white).count();
            if empties % 2 == 0 {
                Color::Black
            } else {
                Color::White
            }
        })
    }
}

/// マスを表す文字か
#[inline]
pub fn is_cell_char(c: u8) -> bool {
    matches!(c, b'X' | b'x' | b'*' | b'O' | b'o' | b'-' | b'.')
}

fn side_marker(c: u8) -> Option<Color> {
    match c {
        b'X' | b'x' | b'*' => Some(Color::Black),
        b'O' | b'o' => Some(Color::White),
        _ => None,
    }
}

/// `start` から64マスと任意の手番記号を読む
///
/// 失敗時は（位置, 理由）を返す。
pub fn parse_cells(bytes: &[u8], start: usize) -> Result<BoardCells, (usize, String)> {
    let mut black = Bitboard::EMPTY;
    let mut white = Bitboard::EMPTY;
    let mut pos = start;
    let mut index = 0u8;

    while index < 64 {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let Some(&c) = bytes.get(pos) else {
            return Err((pos, format!("board ended after {index} cells")));
        };
        let sq = Square::from_index_unchecked(index);
        match c {
            b'X' | b'x' | b'*' => black = black.with(sq),
            b'O' | b'o' => white = white.with(sq),
            b'-' | b'.' => {}
            _ => {
                return Err((
                    pos,
                    format!("unexpected character {:?} in board", c as char),
                ));
            }
        }
        pos += 1;
        index += 1;
    }

    let mut look = pos;
    while look < bytes.len() && bytes[look].is_ascii_whitespace() {
        look += 1;
    }
    let side = bytes.get(look).copied().and_then(side_marker);
    if side.is_some() {
        pos = look + 1;
    }

    Ok(BoardCells {
        black,
        white,
        side,
        end: pos,
    })
}

fn row_string(board: &Board, rank: u8) -> String {
    (0..8u8)
        .map(|file| {
            let sq = Square::from_index_unchecked(rank * 8 + file);
            match board.get(sq) {
                Some(color) => color.symbol(),
                None => '-',
            }
        })
        .collect()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            writeln!(f, "{}", row_string(self, rank))?;
        }
        write!(f, "{}", self.side_to_move().symbol())
    }
}

impl FromStr for Board {
    type Err = SenseiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let cells = parse_cells(bytes, 0)
            .map_err(|(offset, reason)| SenseiError::InvalidBoard(format!("{reason} at byte {offset}")))?;
        if let Some(extra) = bytes[cells.end..].iter().position(|c| !c.is_ascii_whitespace()) {
            return Err(SenseiError::InvalidBoard(format!(
                "trailing characters at byte {}",
                cells.end + extra
            )));
        }
        Board::from_bitboards(cells.black, cells.white, cells.side_to_move())
    }
}

impl From<Board> for BoardStateJson {
    fn from(board: Board) -> Self {
        BoardStateJson {
            rows: (0..8u8).map(|rank| row_string(&board, rank)).collect(),
            turn: board.side_to_move(),
            black: board.discs(Color::Black),
            white: board.discs(Color::White),
            ply: None,
        }
    }
}

impl TryFrom<BoardStateJson> for Board {
    type Error = SenseiError;

    fn try_from(json: BoardStateJson) -> Result<Self, Self::Error> {
        if json.rows.len() != 8 || json.rows.iter().any(|row| row.len() != 8) {
            return Err(SenseiError::InvalidBoard(
                "expected 8 rows of 8 cells".to_string(),
            ));
        }
        let joined = json.rows.concat();
        let cells = parse_cells(joined.as_bytes(), 0)
            .map_err(|(offset, reason)| SenseiError::InvalidBoard(format!("{reason} at cell {offset}")))?;
        let board = Board::from_bitboards(cells.black, cells.white, json.turn)?;
        if board.discs(Color::Black) != json.black || board.discs(Color::White) != json.white {
            return Err(SenseiError::InvalidBoard(
                "disc counts do not match rows".to_string(),
            ));
        }
        Ok(board)
    }
}
