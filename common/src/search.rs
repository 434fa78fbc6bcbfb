//! 検索ボックス向けの絞り込み
//!
//! モンスターDBの候補のうち、読み込み済みスプレッドシートに存在するものだけを返す。
//! API結果に含まれないローカルのモンスターは、画像を後から取得する
//! プレースホルダとして末尾に追加する。
//!
//! 並び順: API結果（候補順） → ローカルのみ（登録順）

use crate::alias::AliasTable;
use crate::normalizer::strip_awakening_marker;
use crate::selection::SECOND_AWAKENING_LEVEL;
use crate::types::{Candidate, SearchHit};

/// 利用可能リストとの照合キー（2A除去・小文字）
pub fn availability_key(name: &str) -> String {
    strip_awakening_marker(name.trim()).0.to_lowercase()
}

/// 利用可能リストの1件
struct AvailableEntry<'a> {
    raw: &'a str,
    base: String,
    key: String,
    translated_key: String,
    second_awakening: bool,
}

impl<'a> AvailableEntry<'a> {
    fn new(raw: &'a str, aliases: &AliasTable) -> Self {
        let (base, second_awakening) = strip_awakening_marker(raw.trim());
        let key = base.to_lowercase();
        let translated_key = aliases.translate(&base).to_lowercase();
        Self {
            raw,
            base,
            key,
            translated_key,
            second_awakening,
        }
    }

    fn matches(&self, candidate_key: &str) -> bool {
        self.key == candidate_key || self.translated_key == candidate_key
    }
}

/// 候補を利用可能リストで絞り込む
///
/// # Arguments
/// * `candidates` - モンスターDBの検索結果
/// * `available` - 読み込み済みスプレッドシートのモンスター名
/// * `query_key` - 2A除去・小文字化した検索語（ローカル部分一致に使う）
/// * `aliases` - エイリアス表
/// * `static_base` - 画像URLのベース
/// * `image_endpoint` - 画像を個別取得するエンドポイント（例: `/api/monster-image`）
pub fn filter_available(
    candidates: &[Candidate],
    available: &[String],
    query_key: &str,
    aliases: &AliasTable,
    static_base: &str,
    image_endpoint: &str,
) -> Vec<SearchHit> {
    let entries: Vec<AvailableEntry> = available
        .iter()
        .map(|name| AvailableEntry::new(name, aliases))
        .collect();
    let mut covered = vec![false; entries.len()];
    let mut hits = Vec::new();

    for candidate in candidates {
        let candidate_key = candidate.name.to_lowercase();
        let mut matched = false;
        let mut awakened = false;

        for (idx, entry) in entries.iter().enumerate() {
            if entry.matches(&candidate_key) {
                covered[idx] = true;
                matched = true;
                awakened |= entry.second_awakening;
            }
        }

        if !matched {
            continue;
        }

        // スプレッドシート側が2A表記で、APIも2段階覚醒版を返した場合は表記を残す
        let display_name = if awakened && candidate.awaken_level == Some(SECOND_AWAKENING_LEVEL) {
            format!("{} (2A)", candidate.name)
        } else {
            candidate.name.clone()
        };
        hits.push(SearchHit::from_candidate(candidate, display_name, static_base));
    }

    for (idx, entry) in entries.iter().enumerate() {
        if covered[idx] || !entry.key.contains(query_key) {
            continue;
        }
        hits.push(SearchHit::deferred(
            entry.raw.to_string(),
            deferred_image_url(image_endpoint, &entry.base),
        ));
    }

    hits
}

/// 画像個別取得エンドポイントのURL
pub fn deferred_image_url(image_endpoint: &str, base_name: &str) -> String {
    format!(
        "{}/{}",
        image_endpoint.trim_end_matches('/'),
        urlencoding::encode(base_name)
    )
}
