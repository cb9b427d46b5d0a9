//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型と、レスポンス形式 `{message, error}` への変換。

use axum::http::StatusCode;
use axum::Json;
use filegate_types::ErrorResponse;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 必須フィールドの欠落（宣言順に全て列挙）
    #[error("The following fields are missing or empty: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// 不正なリクエスト（JSONパース失敗、型不一致、Base64デコード失敗）
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// リクエストボディがサイズ上限を超過
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    /// ストレージ操作に失敗
    #[error("Storage operation failed: {0}")]
    Storage(String),
    /// シークレットの取得・解析に失敗（起動時のみ）
    #[error("Failed to load secret: {0}")]
    Secret(String),
}

impl GatewayError {
    /// エラー種別に対応するHTTPステータス。
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingFields(_) | GatewayError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Storage(_) | GatewayError::Secret(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 失敗した操作の説明を付与してレスポンス用エラーに変換する。
    pub fn context(self, message: &'static str) -> ApiError {
        ApiError {
            message,
            source: self,
        }
    }
}

/// エンドポイントが返すエラー。`message` はエンドポイントごとに固定。
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub source: GatewayError,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            message: self.message.to_string(),
            error: self.source.to_string(),
        };
        (self.source.status(), Json(body)).into_response()
    }
}
