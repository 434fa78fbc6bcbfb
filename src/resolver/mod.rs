//! モンスター名解決エンジン
//!
//! 処理フロー:
//! 1. 2A表記の除去（normalize）
//! 2. エイリアス変換
//! 3. モンスターDB検索
//! 4. 候補選択（2A一致 → 名前一致 → 先頭）
//! 5. キャッシュ書き込み
//!
//! 一括解決と検索ボックスもこのエンジンを経由する。

pub mod cache;
mod coalesce;
pub mod lookup;

pub use cache::{partition_cached, ResolutionCache};
pub use coalesce::KeyCoalescer;
pub use lookup::{LookupFailure, LookupOutcome, MonsterLookup, SwarfarmClient};

use crate::config::Config;
use crate::error::Result;
use futures::future::join_all;
use indexmap::IndexMap;
use monster_compo_common::{
    filter_available, normalize, select_candidate, AliasTable, ResolutionRecord, SearchHit,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// 画像を個別取得するエンドポイント
pub const IMAGE_ENDPOINT: &str = "/api/monster-image";

/// エンジンの設定
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub static_base_url: String,
    pub resolve_limit: usize,
    pub search_limit: usize,
    pub image_endpoint: String,
    pub coalesce_inflight: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ResolverSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            static_base_url: config.static_base_url.clone(),
            resolve_limit: config.resolve_limit,
            search_limit: config.search_limit,
            image_endpoint: IMAGE_ENDPOINT.to_string(),
            coalesce_inflight: config.coalesce_inflight,
        }
    }
}

pub struct Resolver {
    lookup: Arc<dyn MonsterLookup>,
    aliases: Arc<AliasTable>,
    cache: ResolutionCache,
    coalescer: Option<KeyCoalescer>,
    /// 読み込み済みスプレッドシートのモンスター名（丸ごと置き換える）
    available: RwLock<Vec<String>>,
    settings: ResolverSettings,
}

impl Resolver {
    pub fn new(
        lookup: Arc<dyn MonsterLookup>,
        aliases: Arc<AliasTable>,
        settings: ResolverSettings,
    ) -> Self {
        let coalescer = settings.coalesce_inflight.then(KeyCoalescer::new);
        Self {
            lookup,
            aliases,
            cache: ResolutionCache::new(),
            coalescer,
            available: RwLock::new(Vec::new()),
            settings,
        }
    }

    /// 設定からswarfarmクライアント付きで作る
    pub fn from_config(config: &Config) -> Result<Self> {
        let aliases = config.alias_table()?;
        info!(aliases = aliases.len(), "エイリアス表を読み込み");
        Ok(Self::new(
            Arc::new(SwarfarmClient::from_config(config)),
            Arc::new(aliases),
            ResolverSettings::from_config(config),
        ))
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// 処理中の名前解決キー数（同時実行をまとめない設定では常に0）
    pub async fn inflight_len(&self) -> usize {
        match &self.coalescer {
            Some(coalescer) => coalescer.len().await,
            None => 0,
        }
    }

    /// 1件の名前を解決する
    ///
    /// キャッシュにあればそれを返し、なければモンスターDBに問い合わせて結果をキャッシュする。
    /// 見つからない場合は入力名（trim済み）をそのまま返す。
    pub async fn resolve(&self, raw_name: &str) -> ResolutionRecord {
        let name = raw_name.trim();
        if name.is_empty() {
            return ResolutionRecord::not_found(name);
        }

        let key = ResolutionCache::key(name);
        if let Some(record) = self.cache.get(&key).await {
            debug!(monster = name, "キャッシュヒット");
            return record;
        }

        let Some(coalescer) = &self.coalescer else {
            return self.lookup_and_store(name, key).await;
        };

        let guard = coalescer.acquire(&key).await;
        // 待っている間に別のリクエストが書き込んだ可能性
        let record = match self.cache.get(&key).await {
            Some(record) => {
                debug!(monster = name, "キャッシュヒット（待機後）");
                record
            }
            None => self.lookup_and_store(name, key.clone()).await,
        };
        coalescer.release(&key, guard).await;
        record
    }

    async fn lookup_and_store(&self, name: &str, key: String) -> ResolutionRecord {
        let record = self.lookup_record(name).await;
        self.cache.put(key, record.clone()).await;
        record
    }

    async fn lookup_record(&self, name: &str) -> ResolutionRecord {
        let normalized = normalize(name);
        if normalized.is_second_awakening {
            debug!(monster = name, base = %normalized.base_name, "2A表記を検出");
        }

        let query_name = self.aliases.translate(&normalized.base_name);
        if query_name != normalized.base_name {
            info!(monster = name, query = %query_name, "エイリアス変換");
        }

        let outcome = self
            .lookup
            .lookup(&query_name, self.settings.resolve_limit)
            .await;
        if let Some(failure) = outcome.failure() {
            warn!(monster = name, query = %query_name, %failure, "モンスターDB検索に失敗");
        }

        let candidates = outcome.into_candidates();
        match select_candidate(&candidates, &query_name, normalized.is_second_awakening) {
            Some(candidate) => {
                info!(
                    monster = name,
                    resolved = %candidate.name,
                    awaken_level = ?candidate.awaken_level,
                    "モンスターを解決"
                );
                ResolutionRecord::from_candidate(candidate, &self.settings.static_base_url)
            }
            None => {
                info!(monster = name, query = %query_name, "モンスターが見つかりません");
                ResolutionRecord::not_found(name)
            }
        }
    }

    /// 複数の名前をまとめて解決する
    ///
    /// 未キャッシュの名前はキー単位で重複を除いて並行に問い合わせる。
    /// 戻り値のキーは呼び出し側が渡した名前そのもの（重複は1件にまとまる）。
    pub async fn resolve_batch(&self, names: &[String]) -> IndexMap<String, ResolutionRecord> {
        let (mut records, uncached) = partition_cached(names, &self.cache).await;
        debug!(
            total = names.len(),
            cached = records.len(),
            uncached = uncached.len(),
            "一括解決"
        );

        let resolved = join_all(uncached.iter().map(|name| async move {
            (ResolutionCache::key(name), self.resolve(name).await)
        }))
        .await;
        records.extend(resolved);

        names
            .iter()
            .map(|name| {
                let record = records
                    .get(&ResolutionCache::key(name))
                    .cloned()
                    .unwrap_or_else(|| ResolutionRecord::not_found(name.trim()));
                (name.clone(), record)
            })
            .collect()
    }

    /// 検索ボックス用の検索
    ///
    /// 読み込み済みスプレッドシートに存在するモンスターだけを返す。
    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let normalized = normalize(query);
        let query_name = self.aliases.translate(&normalized.base_name);
        let cache_key = ResolutionCache::search_key(query);

        let candidates = match self.cache.get_search(&cache_key).await {
            Some(candidates) => {
                debug!(query, "検索キャッシュヒット");
                candidates
            }
            None => {
                let outcome = self
                    .lookup
                    .lookup(&query_name, self.settings.search_limit)
                    .await;
                match outcome.failure() {
                    // 失敗はキャッシュしない（次の検索で再試行）
                    Some(failure) => {
                        warn!(query, %failure, "モンスターDB検索に失敗");
                        Vec::new()
                    }
                    None => {
                        let candidates = outcome.into_candidates();
                        self.cache.put_search(cache_key, candidates.clone()).await;
                        candidates
                    }
                }
            }
        };

        let available = self.available.read().await.clone();
        let hits = filter_available(
            &candidates,
            &available,
            &normalized.key(),
            &self.aliases,
            &self.settings.static_base_url,
            &self.settings.image_endpoint,
        );
        info!(
            query,
            candidates = candidates.len(),
            available = available.len(),
            hits = hits.len(),
            "検索"
        );
        hits
    }

    /// 利用可能モンスター一覧を置き換える
    pub async fn set_available(&self, monsters: Vec<String>) -> usize {
        let count = monsters.len();
        *self.available.write().await = monsters;
        info!(count, "利用可能モンスター一覧を更新");
        count
    }

    pub async fn available(&self) -> Vec<String> {
        self.available.read().await.clone()
    }

    /// 画像URLだけを返す
    pub async fn image(&self, raw_name: &str) -> Option<String> {
        self.resolve(raw_name).await.image
    }
}
