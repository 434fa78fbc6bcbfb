//! 編成検索
//!
//! 選んだモンスター（最大3体）を全て所持しているプレイヤーを探す。
//! 複数シートのロースターはプレイヤー名で統合する。

use crate::error::{Error, Result};
use crate::search::availability_key;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 編成の最大体数
pub const MAX_COMPO_SIZE: usize = 3;

/// ロースター（スプレッドシート全体）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub sheets: Vec<RosterSheet>,
}

/// 1シート分
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSheet {
    /// 列見出し（モンスター名）。`cells` と同じ並び
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<RosterRow>,
}

/// プレイヤー1行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRow {
    pub player: String,
    /// セルの生テキスト
    #[serde(default)]
    pub cells: Vec<String>,
}

/// 編成を持つプレイヤー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoMatch {
    pub name: String,
    /// 指定されたモンスター名 → 所持数
    pub counts: IndexMap<String, u32>,
}

/// 列見出しがモンスター名として扱えるか
///
/// 2文字以上で、数字のみではないこと。
pub fn is_monster_header(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 2 && !trimmed.chars().all(|c| c.is_ascii_digit())
}

/// セルの所持数（先頭の数字部分、なければ0）
fn parse_count(cell: &str) -> u32 {
    let digits: String = cell
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// 選択モンスターに対応する (シート番号, 列番号) を探す
fn locate_column(roster: &Roster, monster: &str) -> Option<(usize, usize)> {
    let key = availability_key(monster);
    roster.sheets.iter().enumerate().find_map(|(sheet_idx, sheet)| {
        sheet
            .columns
            .iter()
            .position(|col| is_monster_header(col) && availability_key(col) == key)
            .map(|col_idx| (sheet_idx, col_idx))
    })
}

/// 編成を全て所持しているプレイヤーを探す
///
/// # Arguments
/// * `roster` - ロースター
/// * `selected` - 選択したモンスター名（1〜3体）
///
/// # Returns
/// ロースター順のプレイヤー一覧。見つからない列がある場合は空。
pub fn find_players(roster: &Roster, selected: &[String]) -> Result<Vec<CompoMatch>> {
    if selected.is_empty() || selected.len() > MAX_COMPO_SIZE {
        return Err(Error::InvalidInput(format!(
            "モンスターは1〜{}体で指定してください（{}体）",
            MAX_COMPO_SIZE,
            selected.len()
        )));
    }

    let mut locations = Vec::with_capacity(selected.len());
    for monster in selected {
        match locate_column(roster, monster) {
            Some(location) => locations.push((monster, location)),
            None => return Ok(Vec::new()),
        }
    }

    // プレイヤー名 → シート番号 → セル
    let mut players: IndexMap<&str, IndexMap<usize, &[String]>> = IndexMap::new();
    for (sheet_idx, sheet) in roster.sheets.iter().enumerate() {
        for row in &sheet.rows {
            let name = row.player.trim();
            if name.is_empty() {
                continue;
            }
            players
                .entry(name)
                .or_default()
                .insert(sheet_idx, row.cells.as_slice());
        }
    }

    let matches = players
        .into_iter()
        .filter_map(|(name, sheets)| {
            let counts: IndexMap<String, u32> = locations
                .iter()
                .map(|(monster, (sheet_idx, col_idx))| {
                    let count = sheets
                        .get(sheet_idx)
                        .and_then(|cells| cells.get(*col_idx))
                        .map(|cell| parse_count(cell))
                        .unwrap_or(0);
                    (monster.to_string(), count)
                })
                .collect();

            counts.values().all(|&c| c >= 1).then(|| CompoMatch {
                name: name.to_string(),
                counts,
            })
        })
        .collect();

    Ok(matches)
}
