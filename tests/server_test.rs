//! HTTP APIのテスト
//!
//! ルーターに直接リクエストを送り、ステータス・JSON・ヘッダを検証

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{candidate, FakeLookup};
use http_body_util::BodyExt;
use monster_compo::resolver::{Resolver, ResolverSettings};
use monster_compo::server::{build_router, AppState};
use monster_compo_common::AliasTable;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(fake: Arc<FakeLookup>) -> Router {
    let resolver = Resolver::new(fake, Arc::new(AliasTable::builtin()), ResolverSettings::default());
    build_router(AppState::new(resolver))
}

fn sample_lookup() -> Arc<FakeLookup> {
    Arc::new(
        FakeLookup::new()
            .with("Galleon", vec![candidate("Galleon", 1)])
            .with("Lushen", vec![candidate("Lushen", 1), candidate("Lushen", 2)]),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_healthz() {
    let response = app(sample_lookup())
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_monster_found() {
    let (status, body) = get(app(sample_lookup()), "/api/monster/Galion").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], json!(true));
    assert_eq!(body["name"], json!("Galleon"));
    assert_eq!(
        body["image"],
        json!("https://swarfarm.com/static/herders/images/monsters/galleon_1.png")
    );
}

#[tokio::test]
async fn test_monster_second_awakening_encoded_path() {
    let (status, body) = get(app(sample_lookup()), "/api/monster/Lushen%20(2A)").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["awaken_level"], json!(2));
}

/// 見つからず、プレースホルダ表にある名前は画像を補う
#[tokio::test]
async fn test_monster_not_found_with_placeholder() {
    let (status, body) = get(app(sample_lookup()), "/api/monster/Zaiross").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], json!(false));
    assert_eq!(body["name"], json!("Zaiross"));
    let image = body["image"].as_str().unwrap();
    assert!(image.starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_monster_not_found_without_placeholder() {
    let (_, body) = get(app(sample_lookup()), "/api/monster/Nobody").await;

    assert_eq!(body["found"], json!(false));
    assert!(body.get("image").is_none());
}

#[tokio::test]
async fn test_cors_header() {
    let response = app(sample_lookup())
        .oneshot(
            Request::builder()
                .uri("/api/monster/Galion")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_batch() {
    let fake = sample_lookup();
    let (status, body) = post(
        app(fake.clone()),
        "/api/monsters-batch",
        json!({"names": ["Galion", "Lushen", "Galion", "Nobody"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_object().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results["Galion"]["name"], json!("Galleon"));
    assert_eq!(results["Nobody"]["found"], json!(false));
    assert_eq!(fake.call_count(), 3);
}

/// namesが配列でなければ400（DBは呼ばない）
#[tokio::test]
async fn test_batch_rejects_non_array() {
    let fake = sample_lookup();
    let (status, body) = post(
        app(fake.clone()),
        "/api/monsters-batch",
        json!({"names": "Galion"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("names must be an array"));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_batch_empty() {
    let (status, body) = post(
        app(sample_lookup()),
        "/api/monsters-batch",
        json!({"names": []}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": {}}));
}

#[tokio::test]
async fn test_set_available_then_search() {
    let app = app(sample_lookup());

    let (status, body) = post(
        app.clone(),
        "/api/set-available-monsters",
        json!({"monsters": ["Lushen (2A)", "Galion", "Luna"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 3}));

    let (status, body) = get(app, "/api/search/Lu").await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    let names: Vec<&str> = results.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Lushen (2A)", "Luna"]);
    assert_eq!(results[1]["image"], json!("/api/monster-image/Luna"));
    assert_eq!(results[1]["element"], json!("Unknown"));
}

#[tokio::test]
async fn test_set_available_missing_field() {
    let (status, body) = post(app(sample_lookup()), "/api/set-available-monsters", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_monster_image() {
    let app = app(sample_lookup());

    let (status, body) = get(app.clone(), "/api/monster-image/Galion").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["image"],
        json!("https://swarfarm.com/static/herders/images/monsters/galleon_1.png")
    );

    let (_, body) = get(app, "/api/monster-image/Nobody").await;
    assert_eq!(body, json!({"image": null}));
}

fn roster() -> Value {
    json!({
        "sheets": [{
            "columns": ["Joueur", "Galion", "Lushen"],
            "rows": [
                {"player": "Alice", "cells": ["Alice", "1", "2"]},
                {"player": "Bob", "cells": ["Bob", "1", "0"]}
            ]
        }]
    })
}

#[tokio::test]
async fn test_compo() {
    let (status, body) = post(
        app(sample_lookup()),
        "/api/compo",
        json!({"roster": roster(), "monsters": ["Galion", "Lushen"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"players": [{"name": "Alice", "counts": {"Galion": 1, "Lushen": 2}}]})
    );
}

#[tokio::test]
async fn test_compo_too_many_monsters() {
    let (status, body) = post(
        app(sample_lookup()),
        "/api/compo",
        json!({"roster": roster(), "monsters": ["A", "B", "C", "D"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    read_json(response).await
}

/// JSONとして読めないボディも `{error}` 形式の400
#[tokio::test]
async fn test_batch_rejects_invalid_json() {
    let fake = sample_lookup();
    let (status, body) = post_raw(
        app(fake.clone()),
        "/api/monsters-batch",
        "application/json",
        "{ names: [",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_batch_rejects_missing_content_type() {
    let (status, body) = post_raw(
        app(sample_lookup()),
        "/api/monsters-batch",
        "text/plain",
        r#"{"names": ["Galion"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_set_available_rejects_wrong_shape() {
    let (status, body) = post(
        app(sample_lookup()),
        "/api/set-available-monsters",
        json!({"monsters": "Galion"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
