use super::AppState;
use crate::error::{CompoError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use indexmap::IndexMap;
use monster_compo_common::{
    find_players, placeholder_image, CompoMatch, ResolutionRecord, Roster, SearchHit,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub async fn healthz_handler() -> &'static str {
    "ok"
}

/// 1件の名前解決
///
/// 見つからず、プレースホルダ表に載っている名前なら画像だけ補う（キャッシュは変更しない）。
pub async fn monster_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ResolutionRecord>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CompoError::InvalidInput("モンスター名が空です".into()));
    }

    let mut record = state.resolver.resolve(name).await;
    if !record.found && record.image.is_none() {
        record.image = placeholder_image(name);
    }
    Ok(Json(record))
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub results: IndexMap<String, ResolutionRecord>,
}

/// 一括名前解決
///
/// `names` が文字列の配列でなければ、問い合わせ前に400を返す。
pub async fn monsters_batch_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>> {
    let Json(body) = payload.map_err(rejection_to_error)?;
    let names = parse_names(&body)?;
    debug!(count = names.len(), "一括解決リクエスト");
    let results = state.resolver.resolve_batch(&names).await;
    Ok(Json(BatchResponse { results }))
}

/// JSONボディの抽出失敗も `{error}` 形式の400にする
fn rejection_to_error(rejection: JsonRejection) -> CompoError {
    CompoError::InvalidInput(rejection.body_text())
}

fn parse_names(body: &Value) -> Result<Vec<String>> {
    let items = body
        .get("names")
        .and_then(Value::as_array)
        .ok_or_else(|| CompoError::InvalidInput("names must be an array".into()))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| CompoError::InvalidInput("names must contain only strings".into()))
        })
        .collect()
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

pub async fn search_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<SearchResponse> {
    let results = state.resolver.search(&query).await;
    Json(SearchResponse { results })
}

#[derive(Deserialize)]
pub struct SetAvailableRequest {
    #[serde(default)]
    pub monsters: Vec<String>,
}

#[derive(Serialize)]
pub struct SetAvailableResponse {
    pub success: bool,
    pub count: usize,
}

pub async fn set_available_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetAvailableRequest>, JsonRejection>,
) -> Result<Json<SetAvailableResponse>> {
    let Json(body) = payload.map_err(rejection_to_error)?;
    let count = state.resolver.set_available(body.monsters).await;
    Ok(Json(SetAvailableResponse {
        success: true,
        count,
    }))
}

#[derive(Serialize)]
pub struct ImageResponse {
    pub image: Option<String>,
}

pub async fn monster_image_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<ImageResponse> {
    let image = state.resolver.image(&name).await;
    Json(ImageResponse { image })
}

#[derive(Deserialize)]
pub struct CompoRequest {
    #[serde(default)]
    pub roster: Roster,
    pub monsters: Vec<String>,
}

#[derive(Serialize)]
pub struct CompoResponse {
    pub players: Vec<CompoMatch>,
}

pub async fn compo_handler(
    payload: std::result::Result<Json<CompoRequest>, JsonRejection>,
) -> Result<Json<CompoResponse>> {
    let Json(body) = payload.map_err(rejection_to_error)?;
    let players = find_players(&body.roster, &body.monsters)?;
    debug!(monsters = ?body.monsters, players = players.len(), "編成検索");
    Ok(Json(CompoResponse { players }))
}
