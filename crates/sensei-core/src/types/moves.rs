//! 指し手（Move）
//!
//! 1バイトで表現する。0〜63 が着手マス、64 がパス、255 が「指し手なし」。

use std::fmt;
use std::str::FromStr;

use super::Square;

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u8);

impl Move {
    /// パス
    pub const PASS: Move = Move(64);
    /// 指し手なし（置換表の空エントリ用）
    pub const NONE: Move = Move(255);

    /// マスへの着手
    #[inline]
    pub const fn from_square(sq: Square) -> Move {
        Move(sq.raw())
    }

    /// 置換表に格納した生の値から復元
    #[inline]
    pub(crate) const fn from_raw(raw: u8) -> Move {
        match raw {
            0..=64 => Move(raw),
            _ => Move::NONE,
        }
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 着手マス（パス/なしの場合は None）
    #[inline]
    pub const fn square(self) -> Option<Square> {
        if self.0 < 64 {
            Some(Square::from_index_unchecked(self.0))
        } else {
            None
        }
    }

    /// パスかどうか
    #[inline]
    pub const fn is_pass(self) -> bool {
        self.0 == Move::PASS.0
    }

    /// 「指し手なし」かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Move::NONE.0
    }
}

impl From<Square> for Move {
    fn from(sq: Square) -> Move {
        Move::from_square(sq)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.square() {
            Some(sq) => sq.fmt(f),
            None if self.is_pass() => f.write_str("pass"),
            None => f.write_str("none"),
        }
    }
}

impl FromStr for Move {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") || s.eq_ignore_ascii_case("pa") {
            return Ok(Move::PASS);
        }
        s.parse::<Square>().map(Move::from_square)
    }
}

impl serde::Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid move: {s}")))
    }
}
