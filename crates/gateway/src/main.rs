//! # filegate Gateway
//!
//! S3互換オブジェクトストレージへの薄いHTTPゲートウェイ。
//!
//! ## 起動シーケンス
//! 1. 環境変数から設定を読み込む
//! 2. Secrets Manager からバケット名を取得する（失敗時はプロセスを終了）
//! 3. S3クライアントを構築し、共有状態を作成する
//! 4. ルーターを構築して待ち受けを開始する
//!
//! ## API エンドポイント
//! - `GET /health` — シミュレーション用ヘルスチェック
//! - `POST /upload` — Base64ファイルのアップロード
//! - `GET /files` — オブジェクト一覧
//! - `GET /files/{key}` — 署名付きダウンロードURL発行

mod config;
mod endpoints;
mod error;
mod secrets;
mod storage;
mod validate;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{GatewayConfig, GatewayState, PRESIGN_EXPIRY_SECS};
use crate::endpoints::health::ThreadRngPicker;
use crate::secrets::AwsSecretStore;
use crate::storage::S3ObjectStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        region = %config.region,
        secret_id = %config.secret_id,
        "設定を読み込みました"
    );

    // バケット名はシークレットからのみ取得する。取得できなければ起動しない
    let secret_store = AwsSecretStore::from_region(&config.region).await;
    let bucket_name = match secrets::load_bucket_name(&secret_store, &config.secret_id).await {
        Ok(name) => name,
        Err(e) => {
            tracing::error!(secret_id = %config.secret_id, error = %e, "シークレットの取得に失敗");
            std::process::exit(1);
        }
    };
    tracing::info!(bucket = %bucket_name, "バケット名を取得しました");

    let storage = S3ObjectStorage::connect(
        &bucket_name,
        &config.region,
        config.s3_endpoint.as_deref(),
    )?;

    let state = Arc::new(GatewayState {
        bucket_name,
        storage: Arc::new(storage),
        outcome_picker: Box::new(ThreadRngPicker),
        presign_expiry_secs: PRESIGN_EXPIRY_SECS,
    });

    let app = endpoints::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Gatewayを http://{} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
