//! # POST /upload
//!
//! Base64エンコードされたファイル内容をデコードし、
//! 指定されたファイル名をキーとしてオブジェクトストレージへ書き込む。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use filegate_types::{UploadRequest, UploadResponse, UPLOAD_REQUIRED_FIELDS};

use crate::config::GatewayState;
use crate::error::{ApiError, GatewayError};
use crate::storage::ObjectMetadata;
use crate::validate::validate_required;

const UPLOAD_FAILED: &str = "Failed to upload file";
const UPLOAD_SUCCEEDED: &str = "File uploaded successfully";

/// アップロード時に宣言するメタデータ。
///
/// 本体はデコード済みのバイト列だが、`Content-Encoding: base64` を宣言する。
/// 既存の保存済みオブジェクトとの互換性のためこの宣言を維持している。
pub const UPLOAD_METADATA: ObjectMetadata<'static> = ObjectMetadata {
    content_type: "application/octet-stream",
    content_encoding: Some("base64"),
};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// `fileContent` をデコードする。
///
/// パディングの有無は問わず、改行などのASCII空白は無視する。
/// 標準アルファベットで失敗した場合はURLセーフアルファベットで再試行する。
fn decode_content(content: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = content.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD_LENIENT
        .decode(&compact)
        .or_else(|e| URL_SAFE_LENIENT.decode(&compact).map_err(|_| e))
}

/// POST /upload — ファイルアップロード。
pub async fn handle_upload(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let result = match body {
        Ok(Json(body)) => upload(&state, body).await,
        Err(rejection) => Err(rejection_to_error(rejection)),
    };

    result.map(Json).map_err(|e| {
        tracing::warn!(bucket = %state.bucket_name, error = %e, "アップロードに失敗");
        e.context(UPLOAD_FAILED)
    })
}

async fn upload(state: &GatewayState, body: serde_json::Value) -> Result<UploadResponse, GatewayError> {
    validate_required(&body, &UPLOAD_REQUIRED_FIELDS)?;

    let request: UploadRequest = serde_json::from_value(body).map_err(|e| {
        GatewayError::BadRequest(format!("fileName and fileContent must be strings: {e}"))
    })?;

    let content = decode_content(&request.file_content)
        .map_err(|e| GatewayError::BadRequest(format!("fileContent is not valid base64: {e}")))?;

    state
        .storage
        .put_object(&request.file_name, &content, UPLOAD_METADATA)
        .await?;

    tracing::info!(
        bucket = %state.bucket_name,
        key = %request.file_name,
        size = content.len(),
        "ファイルをアップロード"
    );

    Ok(UploadResponse {
        message: UPLOAD_SUCCEEDED.to_string(),
        file_name: request.file_name,
    })
}

fn rejection_to_error(rejection: JsonRejection) -> GatewayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(rejection.body_text())
    } else {
        GatewayError::BadRequest(rejection.body_text())
    }
}
