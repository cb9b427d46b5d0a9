//! # シークレット読み込み
//!
//! 起動時にシークレットストアから設定バンドルを1回だけ取得し、
//! バケット名を取り出す。失敗した場合、呼び出し側はプロセスを終了する。

use crate::error::GatewayError;

/// バケット名を保持するシークレット内のキー
pub const BUCKET_NAME_KEY: &str = "bucketName";

/// シークレットストアの抽象インターフェース。
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// シークレットの文字列値を取得する。
    /// 文字列値を持たない（バイナリのみの）シークレットは `None`。
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, GatewayError>;
}

/// AWS Secrets Manager によるシークレットストア実装。
pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretStore {
    /// 標準の認証情報チェーンを使い、指定リージョンのクライアントを構築する。
    pub async fn from_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>, GatewayError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Secret(format!(
                    "GetSecretValue failed: {}",
                    aws_sdk_secretsmanager::error::DisplayErrorContext(&e)
                ))
            })?;

        Ok(output.secret_string().map(str::to_string))
    }
}

/// シークレットを取得し、バケット名を取り出す。
pub async fn load_bucket_name(
    store: &dyn SecretStore,
    secret_id: &str,
) -> Result<String, GatewayError> {
    let secret_string = store.get_secret_string(secret_id).await?.ok_or_else(|| {
        GatewayError::Secret(format!("secret {secret_id} has no string value"))
    })?;

    parse_bucket_name(&secret_string)
}

/// シークレット文字列をJSONオブジェクトとして解釈し、`bucketName` を取り出す。
fn parse_bucket_name(secret_string: &str) -> Result<String, GatewayError> {
    let value: serde_json::Value = serde_json::from_str(secret_string)
        .map_err(|e| GatewayError::Secret(format!("secret is not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| GatewayError::Secret("secret is not a JSON object".to_string()))?;

    match object.get(BUCKET_NAME_KEY).and_then(|v| v.as_str()) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(GatewayError::Secret(format!(
            "secret does not contain '{BUCKET_NAME_KEY}'"
        ))),
    }
}
