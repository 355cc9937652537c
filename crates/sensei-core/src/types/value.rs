//! 評価値（Value）
//!
//! 終局スコアは `石差 * TERMINAL_SCALE` で表し、静的評価は
//! ±`HEURISTIC_MAX` に収める。これにより勝敗が確定した値は
//! どの静的評価よりも絶対値が大きくなる。

use serde::{Deserialize, Serialize};

/// 評価値（手番側から見た値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 石差1あたりの終局スコア
    pub const TERMINAL_SCALE: i32 = 10_000;
    /// 静的評価の上限（絶対値）
    pub const HEURISTIC_MAX: i32 = 9_999;
    /// 取り得る最大の終局スコア（64石差）
    pub const TERMINAL_MAX: Value = Value(64 * Self::TERMINAL_SCALE);
    /// 無限大（探索窓の初期値）
    pub const INFINITE: Value = Value(Self::TERMINAL_MAX.0 + 1);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// 終局時の石差から生成
    #[inline]
    pub const fn from_disc_difference(diff: i32) -> Value {
        Value(diff * Self::TERMINAL_SCALE)
    }

    /// 静的評価値として生成（±HEURISTIC_MAX に丸める）
    #[inline]
    pub const fn heuristic(v: i32) -> Value {
        if v > Self::HEURISTIC_MAX {
            Value(Self::HEURISTIC_MAX)
        } else if v < -Self::HEURISTIC_MAX {
            Value(-Self::HEURISTIC_MAX)
        } else {
            Value(v)
        }
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// 終局スコア（静的評価の範囲外）かどうか
    ///
    /// 石差0の終局（引き分け）は 0 になり静的評価と区別できない。
    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.0.abs() > Self::HEURISTIC_MAX
    }

    /// 終局スコアなら石差を返す
    #[inline]
    pub const fn disc_difference(self) -> Option<i32> {
        if self.is_terminal() && self.0 % Self::TERMINAL_SCALE == 0 {
            Some(self.0 / Self::TERMINAL_SCALE)
        } else {
            None
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.disc_difference() {
            Some(diff) => write!(f, "{diff:+} discs"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::ops::Mul<i32> for Value {
    type Output = Value;

    #[inline]
    fn mul(self, rhs: i32) -> Value {
        Value(self.0 * rhs)
    }
}

impl From<Value> for i32 {
    fn from(v: Value) -> i32 {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_constants() {
        assert_eq!(Value::ZERO.raw(), 0);
        assert_eq!(Value::TERMINAL_MAX.raw(), 640_000);
        assert!(Value::INFINITE > Value::TERMINAL_MAX);
    }

    #[test]
    fn test_value_terminal_dominates_heuristic() {
        let win = Value::from_disc_difference(1);
        let loss = Value::from_disc_difference(-1);
        assert!(win > Value::heuristic(i32::MAX));
        assert!(loss < Value::heuristic(i32::MIN));
        assert!(win.is_terminal());
        assert!(!Value::heuristic(5000).is_terminal());
    }

    #[test]
    fn test_value_heuristic_clamp() {
        assert_eq!(Value::heuristic(20_000).raw(), Value::HEURISTIC_MAX);
        assert_eq!(Value::heuristic(-20_000).raw(), -Value::HEURISTIC_MAX);
        assert_eq!(Value::heuristic(42).raw(), 42);
    }

    #[test]
    fn test_value_disc_difference() {
        assert_eq!(Value::from_disc_difference(12).disc_difference(), Some(12));
        assert_eq!(Value::from_disc_difference(-64).disc_difference(), Some(-64));
        assert_eq!(Value::new(300).disc_difference(), None);
    }

    #[test]
    fn test_value_neg() {
        assert_eq!(-Value::new(100), Value::new(-100));
        assert_eq!(-Value::ZERO, Value::ZERO);
    }

    #[test]
    fn test_value_add_sub_mul() {
        let a = Value::new(100);
        let b = Value::new(50);
        assert_eq!(a + b, Value::new(150));
        assert_eq!(a - b, Value::new(50));
        assert_eq!(a * 3, Value::new(300));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from_disc_difference(4).to_string(), "+4 discs");
        assert_eq!(Value::new(-120).to_string(), "-120");
    }
}
