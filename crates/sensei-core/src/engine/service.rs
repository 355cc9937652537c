//! エンジンの専用スレッド
//!
//! ホストは `submit` で要求を送り、`recv` で応答を受け取る。応答には要求時の
//! ID が付く。探索中の要求を `cancel` すると停止フラグを立て、その時点までの
//! 結果を返す。待ち行列中の要求を `cancel` すると探索せずに `Cancelled` を返す。

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use log::{debug, warn};

use super::{Engine, EngineRequest, EngineResponse};
use crate::error::Result;

/// ワーカースレッドへの指示
enum Command {
    Analyze { id: u64, request: EngineRequest },
    ClearHash,
    Shutdown,
}

/// 応答の中身
#[derive(Debug)]
pub enum ServiceOutcome {
    /// 探索した（エラーを含む）
    Completed(Result<EngineResponse>),
    /// 探索前に取り消された
    Cancelled,
}

/// 要求 ID つきの応答
#[derive(Debug)]
pub struct ServiceReply {
    pub id: u64,
    pub outcome: ServiceOutcome,
}

/// ワーカーとホストで共有する状態
#[derive(Default)]
struct Shared {
    /// 探索中の要求と停止フラグ
    running: Mutex<Option<(u64, Arc<AtomicBool>)>>,
    /// 取り消し済みで未処理の要求
    cancelled: Mutex<HashSet<u64>>,
    /// ワーカーが取り出した最後の要求 ID（`running` のロック中に更新する）
    started: AtomicU64,
}

/// ロックを取得（ポイズン時は中身を回収する）
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("engine service mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// 専用スレッドで動くエンジン
pub struct EngineService {
    commands: Sender<Command>,
    replies: Receiver<ServiceReply>,
    shared: Arc<Shared>,
    next_id: AtomicU64,
    handle: Option<JoinHandle<()>>,
}

impl EngineService {
    /// ワーカースレッドを起動する
    pub fn spawn(engine: Engine) -> std::io::Result<Self> {
        let (command_tx, command_rx) = unbounded();
        let (reply_tx, reply_rx) = unbounded();
        let shared = Arc::new(Shared::default());

        let worker_shared = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("sensei-engine".to_string())
            .spawn(move || worker_loop(engine, command_rx, reply_tx, worker_shared))?;

        Ok(Self {
            commands: command_tx,
            replies: reply_rx,
            shared,
            next_id: AtomicU64::new(1),
            handle: Some(handle),
        })
    }

    /// 解析要求を送り、要求 ID を返す
    pub fn submit(&self, request: EngineRequest) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if self.commands.send(Command::Analyze { id, request }).is_err() {
            // ワーカーが終了している場合は応答が来ない
            warn!("engine worker is gone, request {id} dropped");
        }
        id
    }

    /// 要求を取り消す
    ///
    /// 探索中なら停止させ（部分結果が返る）、待ち行列中なら `Cancelled` を返させる。
    /// 応答済みの ID や発行していない ID は無視する。
    pub fn cancel(&self, id: u64) {
        // ロック順は running → cancelled（ワーカーと同じ）
        let running = lock_or_recover(&self.shared.running);
        if let Some((running_id, flag)) = running.as_ref() {
            if *running_id == id {
                flag.store(true, Ordering::Relaxed);
                return;
            }
        }
        // 要求は送った順に取り出されるので、started 以下は処理済み
        let started = self.shared.started.load(Ordering::Relaxed);
        let queued = id > started && id < self.next_id.load(Ordering::Relaxed);
        if !queued {
            debug!("cancel for request {id} ignored (not queued)");
            return;
        }
        lock_or_recover(&self.shared.cancelled).insert(id);
    }

    /// 探索中の要求 ID
    pub fn running(&self) -> Option<u64> {
        lock_or_recover(&self.shared.running).as_ref().map(|(id, _)| *id)
    }

    /// 次の探索の前に置換表を空にする
    pub fn clear_hash(&self) {
        let _ = self.commands.send(Command::ClearHash);
    }

    /// 応答を待つ（ワーカー終了時は None）
    pub fn recv(&self) -> Option<ServiceReply> {
        self.replies.recv().ok()
    }

    /// 応答を時間を区切って待つ
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ServiceReply> {
        match self.replies.recv_timeout(timeout) {
            Ok(reply) => Some(reply),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// 届いている応答があれば返す
    pub fn try_recv(&self) -> Option<ServiceReply> {
        match self.replies.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// 探索中の要求を止め、ワーカーを終了させて待つ
    pub fn shutdown(mut self) {
        self.stop_worker();
    }

    fn stop_worker(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Some((_, flag)) = lock_or_recover(&self.shared.running).as_ref() {
            flag.store(true, Ordering::Relaxed);
        }
        let _ = self.commands.send(Command::Shutdown);
        if handle.join().is_err() {
            warn!("engine worker panicked");
        }
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

fn worker_loop(
    engine: Engine,
    commands: Receiver<Command>,
    replies: Sender<ServiceReply>,
    shared: Arc<Shared>,
) {
    debug!("engine worker started");
    while let Ok(command) = commands.recv() {
        let (id, mut request) = match command {
            Command::Analyze { id, request } => (id, request),
            Command::ClearHash => {
                engine.clear_hash();
                continue;
            }
            Command::Shutdown => break,
        };

        {
            let mut running = lock_or_recover(&shared.running);
            shared.started.store(id, Ordering::Relaxed);
            if lock_or_recover(&shared.cancelled).remove(&id) {
                drop(running);
                debug!("request {id} cancelled before search");
                if replies.send(ServiceReply { id, outcome: ServiceOutcome::Cancelled }).is_err() {
                    break;
                }
                continue;
            }
            let flag = request
                .limits
                .stop_flag
                .get_or_insert_with(|| Arc::new(AtomicBool::new(false)))
                .clone();
            *running = Some((id, flag));
        }

        let result = engine.analyze(&request);
        *lock_or_recover(&shared.running) = None;

        let reply = ServiceReply {
            id,
            outcome: ServiceOutcome::Completed(result),
        };
        if replies.send(reply).is_err() {
            break;
        }
    }
    debug!("engine worker stopped");
}
