//! モンスターDB検索クライアント
//!
//! `GET <base>/monsters/?name=<name>&limit=<n>` を1回だけ呼ぶ。
//! 通信エラー・非成功ステータス・不正なボディは `LookupOutcome::Failed` に区別して返し、
//! 呼び出し側（解決エンジン）で「候補なし」に畳み込む。

use crate::config::Config;
use async_trait::async_trait;
use monster_compo_common::{parse_lookup_response, Candidate};
use std::time::Duration;
use tracing::{debug, instrument};

/// 検索失敗の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// DNS・接続・タイムアウト
    Transport(String),
    /// 非成功ステータス
    Status(u16),
    /// 期待した形のJSONではない
    Malformed(String),
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupFailure::Transport(e) => write!(f, "通信エラー: {}", e),
            LookupFailure::Status(code) => write!(f, "ステータス {}", code),
            LookupFailure::Malformed(e) => write!(f, "不正なレスポンス: {}", e),
        }
    }
}

/// 検索結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<Candidate>),
    Empty,
    Failed(LookupFailure),
}

impl LookupOutcome {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        if candidates.is_empty() {
            LookupOutcome::Empty
        } else {
            LookupOutcome::Found(candidates)
        }
    }

    /// 候補一覧（失敗は0件として扱う）
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            LookupOutcome::Found(candidates) => candidates,
            LookupOutcome::Empty | LookupOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn failure(&self) -> Option<&LookupFailure> {
        match self {
            LookupOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// 名前でモンスターを検索する
#[async_trait]
pub trait MonsterLookup: Send + Sync {
    async fn lookup(&self, query_name: &str, limit: usize) -> LookupOutcome;
}

/// swarfarm.com 互換APIのクライアント
#[derive(Debug, Clone)]
pub struct SwarfarmClient {
    base_url: String,
    client: reqwest::Client,
}

impl SwarfarmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// 検索URLを組み立てる（名前はURLエンコードされる）
    pub fn search_url(&self, query_name: &str, limit: usize) -> Result<reqwest::Url, LookupFailure> {
        let endpoint = format!("{}/monsters/", self.base_url.trim_end_matches('/'));
        let mut url = reqwest::Url::parse(&endpoint)
            .map_err(|e| LookupFailure::Transport(format!("不正なURL {}: {}", endpoint, e)))?;
        url.query_pairs_mut()
            .append_pair("name", query_name)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl MonsterLookup for SwarfarmClient {
    #[instrument(name = "monster_lookup", skip(self))]
    async fn lookup(&self, query_name: &str, limit: usize) -> LookupOutcome {
        let url = match self.search_url(query_name, limit) {
            Ok(url) => url,
            Err(failure) => return LookupOutcome::Failed(failure),
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return LookupOutcome::Failed(LookupFailure::Transport(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return LookupOutcome::Failed(LookupFailure::Status(status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return LookupOutcome::Failed(LookupFailure::Transport(e.to_string())),
        };

        match parse_lookup_response(&body) {
            Ok(candidates) => {
                debug!(count = candidates.len(), "検索結果");
                LookupOutcome::from_candidates(candidates)
            }
            Err(e) => LookupOutcome::Failed(LookupFailure::Malformed(e.to_string())),
        }
    }
}
