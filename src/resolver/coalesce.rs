use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 同じキーの問い合わせを1つずつ通す
///
/// 処理中のキーだけを保持する。`release` で待機者がいなければ削除する。
#[derive(Debug, Default)]
pub struct KeyCoalescer {
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// ロックを解放し、他に参照がなければキーを消す
    pub async fn release(&self, key: &str, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut inflight = self.inflight.lock().await;
        // 表だけが持っている = 待機者なし
        if inflight
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            inflight.remove(key);
        }
    }

    /// 処理中のキー数
    pub async fn len(&self) -> usize {
        self.inflight.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
