//! 盤面（Board）

use serde::{Deserialize, Serialize};

use super::zobrist::{zobrist_disc, zobrist_side};
use crate::bitboard::Bitboard;
use crate::error::{Result, SenseiError};
use crate::movegen::{self, LegalMoves};
use crate::types::json::BoardStateJson;
use crate::types::{Color, Move, Square};

/// 局面
///
/// 黒石・白石の集合と手番を持つ値型。着手は常に新しい `Board` を返し、
/// 元の盤面は変更しない。黒白の集合が重ならないことを不変条件とする。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardStateJson", into = "BoardStateJson")]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    side_to_move: Color,
}

impl Board {
    /// 初期局面（d5, e4 が黒、d4, e5 が白、黒番）
    pub const fn initial() -> Board {
        Board {
            black: Bitboard::new((1 << 35) | (1 << 28)),
            white: Bitboard::new((1 << 27) | (1 << 36)),
            side_to_move: Color::Black,
        }
    }

    /// ビットボードから生成（黒白が重なっていれば `InvalidBoard`）
    pub fn from_bitboards(black: Bitboard, white: Bitboard, side_to_move: Color) -> Result<Board> {
        let board = Board {
            black,
            white,
            side_to_move,
        };
        board.validate()?;
        Ok(board)
    }

    /// 不変条件の検査
    pub fn validate(&self) -> Result<()> {
        let overlap = self.black & self.white;
        match overlap.lsb() {
            Some(sq) => Err(SenseiError::InvalidBoard(format!(
                "square {sq} is occupied by both colors"
            ))),
            None => Ok(()),
        }
    }

    /// 手番
    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 指定色の石
    #[inline]
    pub const fn bitboard(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// 手番側の石
    #[inline]
    pub const fn player(&self) -> Bitboard {
        self.bitboard(self.side_to_move)
    }

    /// 相手側の石
    #[inline]
    pub const fn opponent(&self) -> Bitboard {
        self.bitboard(self.side_to_move.opponent())
    }

    /// 空きマス
    #[inline]
    pub fn empties(&self) -> Bitboard {
        !(self.black | self.white)
    }

    /// 空きマスの数
    #[inline]
    pub fn empty_count(&self) -> u32 {
        64 - (self.black | self.white).count()
    }

    /// 指定色の石数
    #[inline]
    pub const fn discs(&self, color: Color) -> u32 {
        self.bitboard(color).count()
    }

    /// マスの石
    pub fn get(&self, sq: Square) -> Option<Color> {
        if self.black.contains(sq) {
            Some(Color::Black)
        } else if self.white.contains(sq) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// 局面キー（Zobrist ハッシュ）
    pub fn key(&self) -> u64 {
        let mut key = 0;
        for sq in self.black {
            key ^= zobrist_disc(Color::Black, sq);
        }
        for sq in self.white {
            key ^= zobrist_disc(Color::White, sq);
        }
        if self.side_to_move == Color::White {
            key ^= zobrist_side();
        }
        key
    }

    /// 着手可能なマスの集合
    #[inline]
    pub fn legal_moves_bb(&self) -> Bitboard {
        movegen::legal_moves_bb(self.player(), self.opponent())
    }

    /// 着手可能なマスを a1, b1, …, h8 の順に列挙
    ///
    /// 空ならパスのみが合法（または終局）。
    #[inline]
    pub fn legal_moves(&self) -> LegalMoves {
        movegen::legal_moves(self)
    }

    /// 手番側に着手可能なマスがあるか
    #[inline]
    pub fn has_moves(&self) -> bool {
        self.legal_moves_bb().is_not_empty()
    }

    /// 終局か（両者とも着手できない）
    pub fn is_terminal(&self) -> bool {
        !self.has_moves() && movegen::legal_moves_bb(self.opponent(), self.player()).is_empty()
    }

    /// パスしか合法手がないか（終局は含まない）
    pub fn must_pass(&self) -> bool {
        !self.has_moves() && !self.is_terminal()
    }

    /// 指し手が合法か
    pub fn is_legal(&self, mv: Move) -> bool {
        match mv.square() {
            Some(sq) => self.legal_moves_bb().contains(sq),
            None => mv.is_pass() && self.must_pass(),
        }
    }

    /// 指し手を適用した新しい局面を返す
    ///
    /// 合法でない指し手は `IllegalMove`。パスは `must_pass()` のときのみ合法。
    pub fn apply(&self, mv: Move) -> Result<Board> {
        if mv.is_pass() {
            return if self.must_pass() {
                Ok(self.pass())
            } else {
                Err(SenseiError::IllegalMove(mv))
            };
        }
        let sq = mv.square().ok_or(SenseiError::IllegalMove(mv))?;
        if self.get(sq).is_some() {
            return Err(SenseiError::IllegalMove(mv));
        }
        let flips = movegen::flips(self.player(), self.opponent(), sq);
        if flips.is_empty() {
            return Err(SenseiError::IllegalMove(mv));
        }
        Ok(self.play(sq, flips))
    }

    /// 合法性検査済みの着手を適用する
    #[inline]
    pub(crate) fn play(&self, sq: Square, flips: Bitboard) -> Board {
        let player = self.player() | flips | Bitboard::from_square(sq);
        let opponent = self.opponent() ^ flips;
        let (black, white) = match self.side_to_move {
            Color::Black => (player, opponent),
            Color::White => (opponent, player),
        };
        Board {
            black,
            white,
            side_to_move: self.side_to_move.opponent(),
        }
    }

    /// 手番だけを入れ替える
    #[inline]
    pub(crate) fn pass(&self) -> Board {
        Board {
            side_to_move: self.side_to_move.opponent(),
            ..*self
        }
    }

    /// 手番側から見た石差（常に計算できる）
    #[inline]
    pub fn disc_difference(&self) -> i32 {
        self.player().count() as i32 - self.opponent().count() as i32
    }

    /// 終局時のみ手番側から見た石差を返す
    ///
    /// 空きマスは勝者に加算しない。
    pub fn score(&self) -> Option<i32> {
        if self.is_terminal() {
            Some(self.disc_difference())
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board(\n{self}\n)")
    }
}
