//! 境界値種別（Bound）

use serde::{Deserialize, Serialize};

use super::Value;

/// 境界値種別（置換表に格納する値の種類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Bound {
    /// なし
    #[default]
    None = 0,
    /// 上界（fail-low: 真の値はこれ以下）
    Upper = 1,
    /// 下界（fail-high: 真の値はこれ以上）
    Lower = 2,
    /// 正確な値
    Exact = 3,
}

impl Bound {
    /// 探索窓 [alpha, beta] に対して置換表の値でカットオフできるか
    #[inline]
    pub const fn can_cutoff(self, value: Value, alpha: Value, beta: Value) -> bool {
        match self {
            Bound::Exact => true,
            Bound::Lower => value.raw() >= beta.raw(),
            Bound::Upper => value.raw() <= alpha.raw(),
            Bound::None => false,
        }
    }

    /// 探索窓と結果から境界種別を決める（fail-soft）
    #[inline]
    pub const fn classify(value: Value, alpha: Value, beta: Value) -> Bound {
        if value.raw() <= alpha.raw() {
            Bound::Upper
        } else if value.raw() >= beta.raw() {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }

    /// u8から変換
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Bound> {
        match n {
            0 => Some(Bound::None),
            1 => Some(Bound::Upper),
            2 => Some(Bound::Lower),
            3 => Some(Bound::Exact),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_from_u8() {
        assert_eq!(Bound::from_u8(0), Some(Bound::None));
        assert_eq!(Bound::from_u8(1), Some(Bound::Upper));
        assert_eq!(Bound::from_u8(2), Some(Bound::Lower));
        assert_eq!(Bound::from_u8(3), Some(Bound::Exact));
        assert_eq!(Bound::from_u8(4), None);
    }

    #[test]
    fn test_bound_can_cutoff() {
        let alpha = Value::new(-50);
        let beta = Value::new(50);

        // Exact は常にカットオフ可能
        assert!(Bound::Exact.can_cutoff(Value::ZERO, alpha, beta));

        // Lower: value >= beta でカットオフ
        assert!(Bound::Lower.can_cutoff(Value::new(100), alpha, beta));
        assert!(!Bound::Lower.can_cutoff(Value::new(30), alpha, beta));

        // Upper: value <= alpha でカットオフ
        assert!(Bound::Upper.can_cutoff(Value::new(-80), alpha, beta));
        assert!(!Bound::Upper.can_cutoff(Value::new(30), alpha, beta));

        assert!(!Bound::None.can_cutoff(Value::ZERO, alpha, beta));
    }

    #[test]
    fn test_bound_classify() {
        let alpha = Value::new(-10);
        let beta = Value::new(10);
        assert_eq!(Bound::classify(Value::new(-10), alpha, beta), Bound::Upper);
        assert_eq!(Bound::classify(Value::new(10), alpha, beta), Bound::Lower);
        assert_eq!(Bound::classify(Value::new(3), alpha, beta), Bound::Exact);
    }

    #[test]
    fn test_bound_default() {
        assert_eq!(Bound::default(), Bound::None);
    }
}
