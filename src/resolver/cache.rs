//! 名前解決キャッシュ
//!
//! 入力名（trim・小文字化）をキーにして解決結果を保持し、
//! 同じ名前の再検索をスキップする。見つからなかった結果もキャッシュする。
//! 検索ボックスの候補は `search:` 接頭辞の別名前空間に置く。
//! 期限切れ・削除はなく、プロセス終了まで保持する。

use monster_compo_common::{Candidate, ResolutionRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 検索用キーの接頭辞
pub const SEARCH_NAMESPACE: &str = "search:";

#[derive(Debug, Default)]
pub struct ResolutionCache {
    /// 入力名 → 解決結果
    records: RwLock<HashMap<String, ResolutionRecord>>,
    /// `search:<検索語>` → 候補
    searches: RwLock<HashMap<String, Vec<Candidate>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前解決のキャッシュキー
    pub fn key(raw_name: &str) -> String {
        raw_name.trim().to_lowercase()
    }

    /// 検索のキャッシュキー
    pub fn search_key(query: &str) -> String {
        format!("{}{}", SEARCH_NAMESPACE, query.trim().to_lowercase())
    }

    /// キャッシュをルックアップ
    pub async fn get(&self, key: &str) -> Option<ResolutionRecord> {
        self.records.read().await.get(key).cloned()
    }

    /// キャッシュに追加（同じキーは後勝ち）
    pub async fn put(&self, key: String, record: ResolutionRecord) {
        self.records.write().await.insert(key, record);
    }

    pub async fn get_search(&self, key: &str) -> Option<Vec<Candidate>> {
        self.searches.read().await.get(key).cloned()
    }

    pub async fn put_search(&self, key: String, candidates: Vec<Candidate>) {
        self.searches.write().await.insert(key, candidates);
    }

    /// 名前解決のキャッシュ件数
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// 検索のキャッシュ件数
    pub async fn search_len(&self) -> usize {
        self.searches.read().await.len()
    }
}

/// キャッシュ済みの名前と未キャッシュの名前に分ける
///
/// - キャッシュにある名前は キャッシュキー → 結果 のマップで返す
/// - ない名前はtrim済み・キー単位で重複を除いて返す（入力順）
pub async fn partition_cached(
    names: &[String],
    cache: &ResolutionCache,
) -> (HashMap<String, ResolutionRecord>, Vec<String>) {
    let mut cached = HashMap::new();
    let mut uncached = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for name in names {
        let key = ResolutionCache::key(name);
        if !seen.insert(key.clone()) {
            continue;
        }

        if let Some(record) = cache.get(&key).await {
            cached.insert(key, record);
        } else {
            uncached.push(name.trim().to_string());
        }
    }

    (cached, uncached)
}
