//! 探索制限

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::types::Depth;

/// 探索制限
///
/// いずれかの制限に達すると、完了済みの最も深い反復の結果を返す。
/// 深さ1の反復は制限に関係なく必ず完了する。
#[derive(Clone, Default)]
pub struct SearchLimits {
    /// 最大探索深さ（None なら `MAX_DEPTH`）
    pub depth: Option<Depth>,
    /// 最大探索時間
    pub time: Option<Duration>,
    /// 最大ノード数
    pub nodes: Option<u64>,
    /// 外部からの停止要求
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// 深さだけを指定
    pub fn depth(depth: Depth) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// 時間だけを指定
    pub fn time(time: Duration) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    /// 停止フラグを設定する
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// 停止要求が出ているか
    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl std::fmt::Debug for SearchLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchLimits")
            .field("depth", &self.depth)
            .field("time", &self.time)
            .field("nodes", &self.nodes)
            .field("stop_flag", &self.stop_flag.as_ref().map(|flag| flag.load(Ordering::Relaxed)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_constructors() {
        let limits = SearchLimits::depth(5);
        assert_eq!(limits.depth, Some(5));
        assert!(limits.time.is_none());
        assert!(!limits.stop_requested());

        let limits = SearchLimits::time(Duration::from_millis(10));
        assert_eq!(limits.time, Some(Duration::from_millis(10)));
    }

    #[test]
    fn test_limits_stop_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let limits = SearchLimits::default().with_stop_flag(Arc::clone(&flag));
        assert!(!limits.stop_requested());
        flag.store(true, Ordering::Relaxed);
        assert!(limits.stop_requested());
    }
}
