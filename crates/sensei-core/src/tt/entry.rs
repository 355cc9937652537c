//! 置換表エントリ

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::types::{Bound, Color, Depth, Move, Value};

/// 置換表から読み出したデータ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTData {
    pub value: Value,
    pub depth: Depth,
    pub bound: Bound,
    pub best_move: Move,
    pub generation: u8,
}

impl TTData {
    pub const EMPTY: TTData = TTData {
        value: Value::ZERO,
        depth: 0,
        bound: Bound::None,
        best_move: Move::NONE,
        generation: 0,
    };
}

// data のビット配置
// 0-31: value, 32-39: depth, 40-41: bound, 42: 白番, 48-55: best move, 56-63: generation
const DEPTH_SHIFT: u32 = 32;
const BOUND_SHIFT: u32 = 40;
const SIDE_BIT: u64 = 1 << 42;
const MOVE_SHIFT: u32 = 48;
const GENERATION_SHIFT: u32 = 56;

/// 圧縮
#[inline]
pub(super) fn pack(data: &TTData, side: Color) -> u64 {
    let depth = data.depth.clamp(0, u8::MAX as Depth) as u64;
    let mut packed = (data.value.raw() as u32 as u64)
        | depth << DEPTH_SHIFT
        | (data.bound as u64) << BOUND_SHIFT
        | (data.best_move.raw() as u64) << MOVE_SHIFT
        | (data.generation as u64) << GENERATION_SHIFT;
    if side == Color::White {
        packed |= SIDE_BIT;
    }
    packed
}

/// 展開（空エントリは None）
#[inline]
pub(super) fn unpack(packed: u64) -> Option<(TTData, Color)> {
    let bound = Bound::from_u8(((packed >> BOUND_SHIFT) & 0b11) as u8)?;
    if bound == Bound::None {
        return None;
    }
    let side = if packed & SIDE_BIT != 0 {
        Color::White
    } else {
        Color::Black
    };
    let data = TTData {
        value: Value::new(packed as u32 as i32),
        depth: ((packed >> DEPTH_SHIFT) & 0xFF) as Depth,
        bound,
        best_move: Move::from_raw((packed >> MOVE_SHIFT) as u8),
        generation: (packed >> GENERATION_SHIFT) as u8,
    };
    Some((data, side))
}

/// 置換表エントリ
///
/// `busy` を try-lock として使い、ロック中のみ3つのフィールドを読み書きする。
#[derive(Default)]
pub struct TTEntry {
    busy: AtomicBool,
    black: AtomicU64,
    white: AtomicU64,
    data: AtomicU64,
}

/// エントリの内容（ロック中に読み出した値）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Snapshot {
    pub black: u64,
    pub white: u64,
    pub data: u64,
}

impl TTEntry {
    /// ロックを試みる（他スレッドが使用中なら None）
    #[inline]
    pub(super) fn try_lock(&self) -> Option<EntryGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| EntryGuard { entry: self })
    }

    /// ロックなしで圧縮データだけを読む（使用率の概算用）
    #[inline]
    pub(super) fn peek_data(&self) -> u64 {
        self.data.load(Ordering::Relaxed)
    }

    /// 空にする
    pub(super) fn reset(&self) {
        self.black.store(0, Ordering::Relaxed);
        self.white.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
        self.busy.store(false, Ordering::Release);
    }
}

/// ロック中のエントリ（drop で解放）
pub(super) struct EntryGuard<'a> {
    entry: &'a TTEntry,
}

impl EntryGuard<'_> {
    #[inline]
    pub fn read(&self) -> Snapshot {
        Snapshot {
            black: self.entry.black.load(Ordering::Relaxed),
            white: self.entry.white.load(Ordering::Relaxed),
            data: self.entry.data.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub fn write(&self, snapshot: Snapshot) {
        self.entry.black.store(snapshot.black, Ordering::Relaxed);
        self.entry.white.store(snapshot.white, Ordering::Relaxed);
        self.entry.data.store(snapshot.data, Ordering::Relaxed);
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.entry.busy.store(false, Ordering::Release);
    }
}
