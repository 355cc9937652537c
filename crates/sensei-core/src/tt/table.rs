//! TranspositionTable本体
//!
//! - Bucket: エントリのグループ
//! - TranspositionTable: テーブル本体
//! - probe/lookup/store操作

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use log::trace;

use super::entry::{Snapshot, TTData, TTEntry, pack, unpack};
use super::{AGE_WEIGHT, BUCKET_SIZE};
use crate::bitboard::Bitboard;
use crate::position::Board;
use crate::types::{Bound, Color, Depth, Move, Value};

/// 別局面のエントリを追い出したときに呼ばれるフック
///
/// 引数は追い出された局面とそのデータ。
pub type EvictionHook = Arc<dyn Fn(&Board, &TTData) + Send + Sync>;

/// バケット構造
/// 同じインデックスに対して複数のエントリを持つ
#[derive(Default)]
#[repr(C, align(64))]
struct Bucket {
    entries: [TTEntry; BUCKET_SIZE],
}

/// 統計カウンター
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TTStats {
    /// probe/lookup の回数
    pub probes: u64,
    /// ヒット数
    pub hits: u64,
    /// 書き込み数
    pub stores: u64,
    /// 別局面を追い出した回数
    pub evictions: u64,
    /// 使用中のエントリに当たった回数
    pub contended: u64,
}

#[derive(Default)]
struct Counters {
    probes: AtomicU64,
    hits: AtomicU64,
    stores: AtomicU64,
    evictions: AtomicU64,
    contended: AtomicU64,
}

impl Counters {
    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// 置換表
///
/// 複数の探索スレッドから `Arc` で共有して使う。
pub struct TranspositionTable {
    /// バケットの配列
    buckets: Box<[Bucket]>,
    /// 世代カウンター
    generation: AtomicU8,
    counters: Counters,
    eviction_hook: Option<EvictionHook>,
}

/// 指定サイズ（MB）に収まるバケット数（最小16）
fn bucket_count_for(mb_size: usize) -> usize {
    (mb_size.saturating_mul(1024 * 1024) / std::mem::size_of::<Bucket>()).max(16)
}

impl TranspositionTable {
    /// 新しい置換表を作成（サイズはMB単位、最小16バケット）
    pub fn new(mb_size: usize) -> Self {
        let bucket_count = bucket_count_for(mb_size);
        let buckets = (0..bucket_count).map(|_| Bucket::default()).collect();
        Self {
            buckets,
            generation: AtomicU8::new(0),
            counters: Counters::default(),
            eviction_hook: None,
        }
    }

    /// 追い出しフックを設定する
    pub fn with_eviction_hook(mut self, hook: EvictionHook) -> Self {
        self.eviction_hook = Some(hook);
        self
    }

    /// バケット数
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// 全エントリを空にする
    pub fn clear(&self) {
        for bucket in self.buckets.iter() {
            for entry in &bucket.entries {
                entry.reset();
            }
        }
        self.generation.store(0, Ordering::Relaxed);
    }

    /// 新しい探索を開始（世代を進める）
    pub fn new_search(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// 現在の世代を取得
    #[inline]
    pub fn generation(&self) -> u8 {
        self.generation.load(Ordering::Relaxed)
    }

    /// 局面に一致するエントリを返す（深さは問わない、手順の並べ替え用）
    pub fn probe(&self, board: &Board) -> Option<TTData> {
        Counters::bump(&self.counters.probes);
        let (black, white, side) = identity(board);
        for entry in &self.bucket(board).entries {
            let Some(guard) = entry.try_lock() else {
                Counters::bump(&self.counters.contended);
                continue;
            };
            let snapshot = guard.read();
            drop(guard);
            if snapshot.black != black || snapshot.white != white {
                continue;
            }
            match unpack(snapshot.data) {
                Some((data, entry_side)) if entry_side == side => {
                    Counters::bump(&self.counters.hits);
                    return Some(data);
                }
                _ => {}
            }
        }
        None
    }

    /// 格納深さが `depth` 以上のエントリだけを返す
    pub fn lookup(&self, board: &Board, depth: Depth) -> Option<TTData> {
        self.probe(board).filter(|data| data.depth >= depth)
    }

    /// 探索結果を書き込む
    ///
    /// 同一局面のエントリは、新しい深さが以上か、古い世代のときだけ上書きする。
    /// 空きがなければ `depth - 世代差 * AGE_WEIGHT` が最小のエントリを追い出す。
    /// バケット内に使用中のエントリがあった場合は書き込まない。
    pub fn store(&self, board: &Board, depth: Depth, value: Value, bound: Bound, best_move: Move) {
        if bound == Bound::None {
            return;
        }
        let generation = self.generation();
        let (black, white, side) = identity(board);
        let new_data = TTData {
            value,
            depth,
            bound,
            best_move,
            generation,
        };
        let new_snapshot = Snapshot {
            black,
            white,
            data: pack(&new_data, side),
        };

        let bucket = self.bucket(board);
        let mut victim: Option<(usize, i32)> = None;
        let mut contended = false;

        for (i, entry) in bucket.entries.iter().enumerate() {
            let Some(guard) = entry.try_lock() else {
                contended = true;
                continue;
            };
            let snapshot = guard.read();
            let Some((old, old_side)) = unpack(snapshot.data) else {
                if victim.is_none_or(|(_, priority)| priority > i32::MIN) {
                    victim = Some((i, i32::MIN));
                }
                continue;
            };
            if snapshot.black == black && snapshot.white == white && old_side == side {
                if depth >= old.depth || old.generation != generation {
                    guard.write(new_snapshot);
                    Counters::bump(&self.counters.stores);
                }
                return;
            }
            let age = generation.wrapping_sub(old.generation) as i32;
            let priority = old.depth - age * AGE_WEIGHT;
            if victim.is_none_or(|(_, best)| priority < best) {
                victim = Some((i, priority));
            }
        }

        // 使用中のエントリが同一局面かもしれないので重複させない
        if contended {
            Counters::bump(&self.counters.contended);
            return;
        }
        let Some((index, _)) = victim else {
            return;
        };
        let Some(guard) = bucket.entries[index].try_lock() else {
            Counters::bump(&self.counters.contended);
            return;
        };
        let evicted = guard.read();
        guard.write(new_snapshot);
        drop(guard);
        Counters::bump(&self.counters.stores);

        if let Some((old, old_side)) = unpack(evicted.data) {
            Counters::bump(&self.counters.evictions);
            trace!("tt evict depth={} gen={} (now {generation})", old.depth, old.generation);
            if let Some(hook) = &self.eviction_hook {
                let old_board = Board::from_bitboards(
                    Bitboard::new(evicted.black),
                    Bitboard::new(evicted.white),
                    old_side,
                );
                if let Ok(old_board) = old_board {
                    hook(&old_board, &old);
                }
            }
        }
    }

    /// 現世代のエントリの使用率を1000分率で返す（先頭から最大1000エントリを標本とする）
    pub fn hashfull(&self) -> u32 {
        let generation = self.generation();
        let sample = self.buckets.len().min(1000 / BUCKET_SIZE);
        let mut count = 0u32;
        for bucket in self.buckets.iter().take(sample) {
            for entry in &bucket.entries {
                match unpack(entry.peek_data()) {
                    Some((data, _)) if data.generation == generation => count += 1,
                    _ => {}
                }
            }
        }
        count * 1000 / (sample * BUCKET_SIZE) as u32
    }

    /// 統計カウンターのスナップショット
    pub fn stats(&self) -> TTStats {
        let c = &self.counters;
        TTStats {
            probes: c.probes.load(Ordering::Relaxed),
            hits: c.hits.load(Ordering::Relaxed),
            stores: c.stores.load(Ordering::Relaxed),
            evictions: c.evictions.load(Ordering::Relaxed),
            contended: c.contended.load(Ordering::Relaxed),
        }
    }

    /// バケットインデックスを計算
    #[inline]
    fn bucket(&self, board: &Board) -> &Bucket {
        // key * bucket_count / 2^64 でインデックスを計算
        let index = ((board.key() as u128 * self.buckets.len() as u128) >> 64) as usize;
        &self.buckets[index]
    }
}

#[inline]
fn identity(board: &Board) -> (u64, u64, Color) {
    (
        board.bitboard(Color::Black).raw(),
        board.bitboard(Color::White).raw(),
        board.side_to_move(),
    )
}
