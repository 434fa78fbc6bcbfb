//! 候補の選択ルール
//!
//! 優先順位:
//! 1. 2A指定あり → 名前一致 かつ awaken_level == 2
//! 2. 名前一致（大文字小文字を無視、最初の1件）
//! 3. 先頭の候補
//!
//! 2A指定でも2段階覚醒の候補が無ければ通常版に落ちる（not foundにはしない）。

use crate::types::Candidate;

/// 2段階覚醒のawaken_level
pub const SECOND_AWAKENING_LEVEL: i32 = 2;

/// 候補から1件を選ぶ
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    query_name: &str,
    second_awakening: bool,
) -> Option<&'a Candidate> {
    if second_awakening {
        let awakened = candidates.iter().find(|c| {
            c.name_matches(query_name) && c.awaken_level == Some(SECOND_AWAKENING_LEVEL)
        });
        if awakened.is_some() {
            return awakened;
        }
    }

    candidates
        .iter()
        .find(|c| c.name_matches(query_name))
        .or_else(|| candidates.first())
}
