//! # Gatewayエンドポイント
//!
//! ## API エンドポイント
//! - `GET /health` — シミュレーション用ヘルスチェック
//! - `POST /upload` — Base64ファイルのアップロード
//! - `GET /files` — オブジェクト一覧
//! - `GET /files/{key}` — 署名付きダウンロードURL発行

pub mod files;
pub mod health;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

pub use files::{handle_list_files, handle_signed_url};
pub use health::handle_health;
pub use upload::handle_upload;

use crate::config::{GatewayState, MAX_BODY_BYTES};

/// 全エンドポイントを登録したルーターを構築する。
pub fn router(state: Arc<GatewayState>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(handle_health))
        .route("/upload", post(handle_upload))
        .route("/files", get(handle_list_files))
        .route("/files/{key}", get(handle_signed_url))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
