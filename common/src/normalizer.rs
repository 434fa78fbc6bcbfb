//! モンスター名の正規化
//!
//! スプレッドシートの列見出しや検索語から覚醒2段階（2A）の表記を取り除き、
//! 検索に使う基本名と2Aフラグを取り出す。
//!
//! 対応する表記:
//! - `Galion (2A)` / `Galion(2a)` / `Galion ( 2A )`
//! - `Galion 2A` / `2A Galion`
//! - `Galion2A`（語末に続けた表記）

use regex::Regex;

/// 正規化済みの検索名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// 2A表記を除いた名前（表示用の大文字小文字は保持）
    pub base_name: String,
    /// 2A表記があったか
    pub is_second_awakening: bool,
}

impl NormalizedQuery {
    /// 比較用のキー（小文字）
    pub fn key(&self) -> String {
        self.base_name.to_lowercase()
    }
}

lazy_static::lazy_static! {
    // 括弧つき: "(2A)"
    static ref PAREN_2A_RE: Regex = Regex::new(r"(?i)\s*\(\s*2a\s*\)\s*").unwrap();
    // 単独トークン: 前後が空白または端
    static ref BARE_2A_RE: Regex = Regex::new(r"(?i)(^|\s)2a(\s|$)").unwrap();
    // 語末に続けた表記: "Lushen2A"（語中の "Ka2ax" は対象外）
    static ref SUFFIX_2A_RE: Regex = Regex::new(r"(?i)(\p{L})2a(\s|$)").unwrap();
    static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// 2A表記を取り除いた文字列と、取り除いたかどうかを返す
pub fn strip_awakening_marker(raw: &str) -> (String, bool) {
    let mut found = false;
    let mut text = raw.to_string();

    if PAREN_2A_RE.is_match(&text) {
        found = true;
        text = PAREN_2A_RE.replace_all(&text, " ").into_owned();
    }

    // "2A 2A" のように区切り空白を共有する場合があるので消えるまで繰り返す
    while BARE_2A_RE.is_match(&text) {
        found = true;
        text = BARE_2A_RE.replace_all(&text, " ").into_owned();
    }

    if SUFFIX_2A_RE.is_match(&text) {
        found = true;
        text = SUFFIX_2A_RE.replace_all(&text, "${1}${2}").into_owned();
    }

    let collapsed = SPACES_RE.replace_all(text.trim(), " ").into_owned();
    (collapsed, found)
}

/// 名前を正規化する
///
/// 失敗しない。2Aを除くと空になる場合は入力（trim済み）をそのまま返す。
pub fn normalize(raw: &str) -> NormalizedQuery {
    let trimmed = raw.trim();
    let (base_name, is_second_awakening) = strip_awakening_marker(trimmed);

    if base_name.is_empty() {
        return NormalizedQuery {
            base_name: trimmed.to_string(),
            is_second_awakening: false,
        };
    }

    NormalizedQuery {
        base_name,
        is_second_awakening,
    }
}
