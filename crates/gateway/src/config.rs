//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 共有状態は起動シーケンスで一度だけ構築され、以後は読み取り専用。

use std::sync::Arc;

use anyhow::Context;

use crate::endpoints::health::OutcomePicker;
use crate::storage::ObjectStorage;

/// `PORT` 未設定時の待ち受けポート
pub const DEFAULT_PORT: u16 = 3000;
/// S3・Secrets Manager 共通のデフォルトリージョン
pub const DEFAULT_REGION: &str = "us-east-1";
/// バケット名を保持するシークレットのデフォルトID
pub const DEFAULT_SECRET_ID: &str = "stg/AppUploadFile/Configs";
/// 署名付きダウンロードURLの有効期限（秒）
pub const PRESIGN_EXPIRY_SECS: u32 = 3600;
/// リクエストボディの上限（50MB）
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// 起動時に環境変数から読み込む設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// 待ち受けポート（`PORT`）
    pub port: u16,
    /// AWSリージョン（`AWS_REGION`）
    pub region: String,
    /// シークレットID（`CONFIG_SECRET_ID`）
    pub secret_id: String,
    /// S3互換エンドポイント（`S3_ENDPOINT`）。MinIO等を使う場合のみ設定
    pub s3_endpoint: Option<String>,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から構築する。空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORTが不正です: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            secret_id: get("CONFIG_SECRET_ID").unwrap_or_else(|| DEFAULT_SECRET_ID.to_string()),
            s3_endpoint: get("S3_ENDPOINT"),
        })
    }
}

/// Gatewayの共有状態。
pub struct GatewayState {
    /// シークレットから取得したバケット名
    pub bucket_name: String,
    /// オブジェクトストレージ（S3互換等、トレイトで抽象化）
    pub storage: Arc<dyn ObjectStorage>,
    /// /health の応答を選ぶ乱数源
    pub outcome_picker: Box<dyn OutcomePicker>,
    /// 署名付きURLの有効期限（秒）
    pub presign_expiry_secs: u32,
}
