//! 名前解決の型定義
//!
//! CLIとHTTPサーバで共有される型:
//! - Candidate: モンスターDB検索APIが返す1件
//! - ResolutionRecord: 名前解決の出力（キャッシュの値）
//! - SearchHit: 検索ボックス向けの出力

use serde::{Deserialize, Serialize};

/// モンスターDB検索APIの候補1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,

    #[serde(default)]
    pub image_filename: Option<String>,

    #[serde(default)]
    pub element: Option<String>,

    #[serde(default)]
    pub archetype: Option<String>,

    #[serde(default)]
    pub awaken_level: Option<i32>,
}

impl Candidate {
    /// 名前が一致するか（大文字小文字を無視）
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// 画像URLを組み立てる
    pub fn image_url(&self, static_base: &str) -> Option<String> {
        self.image_filename
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| image_url(static_base, f))
    }
}

/// 名前解決の結果
///
/// `found == false` のときは `name`（入力そのまま）だけが意味を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub found: bool,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awaken_level: Option<i32>,
}

impl ResolutionRecord {
    /// 見つからなかった場合のレコード
    pub fn not_found(name: impl Into<String>) -> Self {
        Self {
            found: false,
            name: name.into(),
            image: None,
            element: None,
            archetype: None,
            awaken_level: None,
        }
    }

    /// 候補からレコードを作成
    pub fn from_candidate(candidate: &Candidate, static_base: &str) -> Self {
        Self {
            found: true,
            name: candidate.name.clone(),
            image: candidate.image_url(static_base),
            element: candidate.element.clone(),
            archetype: candidate.archetype.clone(),
            awaken_level: candidate.awaken_level,
        }
    }
}

/// 検索結果1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub image: Option<String>,
    pub element: String,
    pub archetype: String,
    pub awaken_level: i32,
}

impl SearchHit {
    /// API結果に基づくヒット
    pub fn from_candidate(candidate: &Candidate, display_name: String, static_base: &str) -> Self {
        Self {
            name: display_name,
            image: candidate.image_url(static_base),
            element: candidate.element.clone().unwrap_or_else(|| UNKNOWN.into()),
            archetype: candidate.archetype.clone().unwrap_or_else(|| UNKNOWN.into()),
            awaken_level: candidate.awaken_level.unwrap_or(0),
        }
    }

    /// ローカルのみのヒット（画像は後から個別エンドポイントで取得）
    pub fn deferred(name: String, image_endpoint: String) -> Self {
        Self {
            name,
            image: Some(image_endpoint),
            element: UNKNOWN.into(),
            archetype: UNKNOWN.into(),
            awaken_level: 0,
        }
    }
}

const UNKNOWN: &str = "Unknown";

/// 画像ファイル名から画像URLを組み立てる
///
/// `<static_base>/images/monsters/<image_filename>`
pub fn image_url(static_base: &str, image_filename: &str) -> String {
    format!(
        "{}/images/monsters/{}",
        static_base.trim_end_matches('/'),
        image_filename
    )
}
