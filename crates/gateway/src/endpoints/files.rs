//! # GET /files, GET /files/:key
//!
//! オブジェクト一覧の取得と、署名付きダウンロードURLの発行。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use filegate_types::{FileListResponse, SignedUrlResponse};

use crate::config::GatewayState;
use crate::error::ApiError;

const LIST_FAILED: &str = "Failed to list files";
const SIGN_FAILED: &str = "Failed to generate signed URL";

/// GET /files — バケット内の全オブジェクトを返す。
pub async fn handle_list_files(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.storage.list_objects().await.map_err(|e| {
        tracing::error!(bucket = %state.bucket_name, error = %e, "オブジェクト一覧の取得に失敗");
        e.context(LIST_FAILED)
    })?;

    Ok(Json(FileListResponse { files }))
}

/// GET /files/:key — 署名付きダウンロードURL発行。
///
/// キーはパスセグメントをそのまま使用し、オブジェクトの存在は確認しない。
/// 存在しないキーに対するURLはアクセス時に初めて失敗する。
pub async fn handle_signed_url(
    State(state): State<Arc<GatewayState>>,
    Path(key): Path<String>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let signed_url = state
        .storage
        .presign_get(&key, state.presign_expiry_secs)
        .await
        .map_err(|e| {
            tracing::error!(key = %key, error = %e, "署名付きURLの生成に失敗");
            e.context(SIGN_FAILED)
        })?;

    Ok(Json(SignedUrlResponse { signed_url }))
}
