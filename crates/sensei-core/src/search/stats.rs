//! 探索統計（search-stats feature有効時のみ）
//!
//! 置換表カットオフや手順の並べ替えの効き具合を記録し、デバッグに使用する。

/// 深度別統計の最大深度
#[cfg(feature = "search-stats")]
pub(super) const STATS_MAX_DEPTH: usize = 64;

/// 探索統計カウンタ
#[cfg(feature = "search-stats")]
#[derive(Debug, Clone)]
pub struct SearchStats {
    /// 置換表プローブ回数
    pub tt_probe: u64,
    /// 置換表カットオフ回数
    pub tt_cutoff: u64,
    /// 確定石による範囲カットオフ回数
    pub stability_cutoff: u64,
    /// beta カットオフ回数
    pub beta_cutoff: u64,
    /// 最初の手で beta カットオフした回数
    pub first_move_cutoff: u64,
    /// パスで手番を渡したノード数
    pub pass_nodes: u64,
    /// 終局ノード数
    pub terminal_nodes: u64,
    /// 残り深さ別ノード数
    pub nodes_by_depth: [u64; STATS_MAX_DEPTH],
}

#[cfg(feature = "search-stats")]
impl Default for SearchStats {
    fn default() -> Self {
        Self {
            tt_probe: 0,
            tt_cutoff: 0,
            stability_cutoff: 0,
            beta_cutoff: 0,
            first_move_cutoff: 0,
            pass_nodes: 0,
            terminal_nodes: 0,
            nodes_by_depth: [0; STATS_MAX_DEPTH],
        }
    }
}

#[cfg(feature = "search-stats")]
impl SearchStats {
    /// 別スレッドの統計を加算
    pub fn merge(&mut self, other: &SearchStats) {
        self.tt_probe += other.tt_probe;
        self.tt_cutoff += other.tt_cutoff;
        self.stability_cutoff += other.stability_cutoff;
        self.beta_cutoff += other.beta_cutoff;
        self.first_move_cutoff += other.first_move_cutoff;
        self.pass_nodes += other.pass_nodes;
        self.terminal_nodes += other.terminal_nodes;
        for (a, b) in self.nodes_by_depth.iter_mut().zip(other.nodes_by_depth.iter()) {
            *a += b;
        }
    }

    /// 統計をフォーマットして文字列として返す
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Search Statistics ===\n");
        report.push_str(&format!("TT probes:           {:>12}\n", self.tt_probe));
        report.push_str(&format!("TT cutoffs:          {:>12}\n", self.tt_cutoff));
        report.push_str(&format!("Stability cutoffs:   {:>12}\n", self.stability_cutoff));
        report.push_str(&format!("Beta cutoffs:        {:>12}\n", self.beta_cutoff));
        if self.beta_cutoff > 0 {
            let rate = self.first_move_cutoff as f64 / self.beta_cutoff as f64 * 100.0;
            report.push_str(&format!("First move cutoffs:  {:>12} ({rate:.1}%)\n", self.first_move_cutoff));
        }
        report.push_str(&format!("Pass nodes:          {:>12}\n", self.pass_nodes));
        report.push_str(&format!("Terminal nodes:      {:>12}\n", self.terminal_nodes));
        report.push_str("--- Nodes by Depth ---\n");
        for (d, &count) in self.nodes_by_depth.iter().enumerate() {
            if count > 0 {
                report.push_str(&format!("  depth {d:>2}: {count:>10} nodes\n"));
            }
        }
        report
    }
}

// =============================================================================
// 統計マクロ
// =============================================================================

/// 統計カウンタをインクリメントするマクロ（feature有効時のみ実行）
#[cfg(feature = "search-stats")]
macro_rules! inc_stat {
    ($self:expr, $field:ident) => {
        $self.stats.$field += 1;
    };
}

#[cfg(not(feature = "search-stats"))]
macro_rules! inc_stat {
    ($self:expr, $field:ident) => {};
}

/// 深度別統計をカウントするマクロ（feature有効時のみ実行）
#[cfg(feature = "search-stats")]
macro_rules! inc_stat_by_depth {
    ($self:expr, $field:ident, $depth:expr) => {
        let d = ($depth.max(0) as usize).min($crate::search::stats::STATS_MAX_DEPTH - 1);
        $self.stats.$field[d] += 1;
    };
}

#[cfg(not(feature = "search-stats"))]
macro_rules! inc_stat_by_depth {
    ($self:expr, $field:ident, $depth:expr) => {};
}

// マクロを search モジュール内で使えるようにする
pub(super) use inc_stat;
pub(super) use inc_stat_by_depth;
