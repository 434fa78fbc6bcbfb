//! モンスターDBレスポンスパーサー
//!
//! `GET <base>/monsters/?name=...&limit=n` のレスポンスボディから候補を取り出す。

use crate::error::{Error, Result};
use crate::types::Candidate;
use serde::Deserialize;

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Option<Vec<Candidate>>,
}

/// 検索レスポンスをパース
///
/// `results` が無い・nullの場合は候補0件として扱う。
/// JSONとして不正、または `results` の要素の形が違う場合はエラー。
///
/// # Examples
/// ```
/// use monster_compo_common::parse_lookup_response;
///
/// let body = r#"{"results": [{"name": "Galleon", "image_filename": "galleon.png", "awaken_level": 1}]}"#;
/// let candidates = parse_lookup_response(body).unwrap();
/// assert_eq!(candidates[0].name, "Galleon");
/// ```
pub fn parse_lookup_response(body: &str) -> Result<Vec<Candidate>> {
    let response: LookupResponse = serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("検索レスポンスのパースエラー: {}", e)))?;
    Ok(response.results.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "count": 2,
            "next": null,
            "results": [
                {"name": "Galleon", "image_filename": "unit_icon_0001.png", "element": "Wind", "archetype": "Support", "awaken_level": 1, "com2us_id": 12345},
                {"name": "Galleon", "image_filename": "unit_icon_0002.png", "element": "Wind", "archetype": "Support", "awaken_level": 2}
            ]
        }"#;
        let candidates = parse_lookup_response(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].awaken_level, Some(2));
        assert_eq!(candidates[0].element.as_deref(), Some("Wind"));
    }

    #[test]
    fn test_parse_missing_results() {
        assert!(parse_lookup_response(r#"{"detail": "Not found."}"#).unwrap().is_empty());
        assert!(parse_lookup_response(r#"{"results": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_null_fields() {
        let body = r#"{"results": [{"name": "Foo", "image_filename": null, "element": null}]}"#;
        let candidates = parse_lookup_response(body).unwrap();
        assert_eq!(candidates[0].image_filename, None);
        assert_eq!(candidates[0].awaken_level, None);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_lookup_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(parse_lookup_response(r#"{"results": "nope"}"#).is_err());
        assert!(parse_lookup_response(r#"{"results": [{"image_filename": "a.png"}]}"#).is_err());
    }
}
