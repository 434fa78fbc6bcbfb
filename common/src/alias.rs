//! エイリアス変換モジュール
//!
//! スプレッドシートの表記（フランス語名・綴りゆれ）を
//! モンスターDBの検索名に変換する。
//! 照合は小文字・前後空白除去後の完全一致のみ（部分一致はしない）。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// エイリアス定義（JSONファイル形式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasConfig {
    /// 表記 → 検索名
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// 読み取り専用のエイリアス表
///
/// 起動時に一度だけ構築し、以後は変更しない。
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// 組み込みプリセット
    pub fn builtin() -> Self {
        let mut table = Self::default();

        // フランス語 → 英語
        table.insert("galion", "Galleon");
        table.insert("agirus", "Aegir");
        table.insert("hartmann", "Hertman");
        table.insert("judiah", "Judea");
        table.insert("spadassin du qilin", "Qilin Swordsman");
        table.insert("ramael", "Ryu");

        table
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AliasConfig = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (from, to) in &config.aliases {
            table.insert(from, to);
        }
        Ok(table)
    }

    fn insert(&mut self, from: &str, to: &str) {
        let key = Self::key(from);
        let value = to.trim();
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.entries.insert(key, value.to_string());
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &AliasTable) {
        self.entries.extend(other.entries.clone());
    }

    /// 検索名を取得
    pub fn lookup(&self, base_name: &str) -> Option<&str> {
        self.entries.get(&Self::key(base_name)).map(String::as_str)
    }

    /// 検索名に変換（未登録ならそのまま返す）
    pub fn translate(&self, base_name: &str) -> String {
        match self.lookup(base_name) {
            Some(canonical) => canonical.to_string(),
            None => base_name.to_string(),
        }
    }

    /// 登録件数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
