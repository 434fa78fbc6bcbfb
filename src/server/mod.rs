//! HTTPサーバ
//!
//! 名前解決エンジンをJSON APIとして公開する。
//! 状態（キャッシュ・利用可能モンスター一覧）は `AppState` が持ち、各ハンドラに注入する。

mod handlers;

use crate::config::Config;
use crate::error::{CompoError, Result};
use crate::resolver::Resolver;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// リクエストボディの上限（スプレッドシートのロースター込み）
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route("/api/monster/:name", get(handlers::monster_handler))
        .route("/api/monsters-batch", post(handlers::monsters_batch_handler))
        .route("/api/search/:query", get(handlers::search_handler))
        .route(
            "/api/set-available-monsters",
            post(handlers::set_available_handler),
        )
        .route("/api/monster-image/:name", get(handlers::monster_image_handler))
        .route("/api/compo", post(handlers::compo_handler))
        .layer(map_response(cors_headers))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

impl IntoResponse for CompoError {
    fn into_response(self) -> Response {
        let status = if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            error!(error = %self, "リクエスト処理エラー");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// サーバを起動し、Ctrl-Cまで待ち受ける
pub async fn serve(config: &Config, bind: Option<&str>) -> Result<()> {
    let resolver = Resolver::from_config(config)?;
    let router = build_router(AppState::new(resolver));

    let addr = bind.unwrap_or(&config.bind);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CompoError::Server(format!("{} で待ち受けできません: {}", addr, e)))?;
    info!(addr, api = %config.api_base_url, "サーバ起動");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("サーバ停止");
        })
        .await
        .map_err(|e| CompoError::Server(e.to_string()))
}
