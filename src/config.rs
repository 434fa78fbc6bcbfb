use crate::error::{CompoError, Result};
use monster_compo_common::AliasTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// モンスターDB APIのベースURL（`/monsters/` の手前まで）
    pub api_base_url: String,
    /// 画像URLのベース（`/images/monsters/` の手前まで）
    pub static_base_url: String,
    /// 待ち受けアドレス
    pub bind: String,
    pub timeout_seconds: u64,
    /// 追加のエイリアスJSONファイル
    pub alias_file: Option<PathBuf>,
    /// 名前解決時の取得件数
    pub resolve_limit: usize,
    /// 検索時の取得件数
    pub search_limit: usize,
    /// 処理中の同一キーをまとめる
    pub coalesce_inflight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://swarfarm.com/api/v2".into(),
            static_base_url: "https://swarfarm.com/static/herders".into(),
            bind: "127.0.0.1:3000".into(),
            timeout_seconds: 15,
            alias_file: None,
            resolve_limit: 10,
            search_limit: 15,
            coalesce_inflight: true,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CompoError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("monster-compo").join("config.json"))
    }

    /// 環境変数を優先
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("MONSTER_COMPO_API_BASE") {
            self.api_base_url = v;
        }
        if let Ok(v) = std::env::var("MONSTER_COMPO_STATIC_BASE") {
            self.static_base_url = v;
        }
        if let Ok(v) = std::env::var("MONSTER_COMPO_BIND") {
            self.bind = v;
        } else if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.trim().parse::<u16>() {
                self.bind = format!("0.0.0.0:{}", port);
            }
        }
        if let Ok(v) = std::env::var("MONSTER_COMPO_ALIAS_FILE") {
            if !v.trim().is_empty() {
                self.alias_file = Some(PathBuf::from(v));
            }
        }
        self
    }

    /// 組み込みプリセットと追加ファイルからエイリアス表を作る
    pub fn alias_table(&self) -> Result<AliasTable> {
        let mut table = AliasTable::builtin();

        if let Some(path) = &self.alias_file {
            if !path.exists() {
                return Err(CompoError::Config(format!(
                    "エイリアスファイルが見つかりません: {}",
                    path.display()
                )));
            }
            let custom = AliasTable::from_file(path)?;
            table.merge(&custom);
        }

        Ok(table)
    }
}
