//! # filegate 共有型定義
//!
//! Gatewayのリクエスト/レスポンス本体と、ヘルスチェックプローバーが
//! 解釈するレスポンス型をRust構造体として提供する。
//!
//! ## 命名規則
//! - リクエスト/レスポンス: camelCase（既存クライアントとの互換性のため）
//! - オブジェクト記述子: PascalCase（S3リスティング結果の形をそのまま公開）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

/// アップロード時に必須となるフィールド名（宣言順にエラーへ列挙される）。
pub const UPLOAD_REQUIRED_FIELDS: [&str; 2] = ["fileName", "fileContent"];

/// /upload リクエスト。
///
/// 必須フィールドの検証はデシリアライズ前にJSON値に対して行うため、
/// この型は検証済みの本体からのみ構築される。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// オブジェクトキー（サニタイズせずそのまま使用）
    pub file_name: String,
    /// Base64エンコードされたファイル内容
    pub file_content: String,
}

/// /upload 成功レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// 完了メッセージ
    pub message: String,
    /// アップロードしたファイル名
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// GET /files
// ---------------------------------------------------------------------------

/// ストレージ上のオブジェクト記述子。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoredObject {
    /// オブジェクトキー
    pub key: String,
    /// 最終更新日時（ISO 8601）
    pub last_modified: String,
    /// ETag
    #[serde(rename = "ETag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    /// サイズ（バイト）
    pub size: u64,
    /// ストレージクラス
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

/// /files レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<StoredObject>,
}

// ---------------------------------------------------------------------------
// GET /files/:key
// ---------------------------------------------------------------------------

/// /files/:key レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    /// 署名付きダウンロードURL（有効期限付き）
    pub signed_url: String,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// /health レスポンス。HTTPステータスと同じ値を `status` に持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: u16,
    pub message: String,
}

// ---------------------------------------------------------------------------
// エラー
// ---------------------------------------------------------------------------

/// 全エンドポイント共通のエラーレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 失敗した操作の説明
    pub message: String,
    /// 原因となったエラーの内容
    pub error: String,
}
