//! # 障害通知
//!
//! ヘルスチェック失敗時の通知先を抽象化する。

/// 通知の件名
pub const ALERT_SUBJECT: &str = "[ALERT CHECK HEALTH]";

/// 通知エラー型。
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SNSへの発行に失敗
    #[error("SNS publish failed: {0}")]
    Publish(String),
}

/// 通知先の抽象インターフェース。
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Amazon SNS トピックへ発行する通知実装。
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsNotifier {
    /// 標準の認証情報チェーンを使い、指定リージョンのクライアントを構築する。
    pub async fn from_region(region: &str, topic_arn: String) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: aws_sdk_sns::Client::new(&sdk_config),
            topic_arn,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for SnsNotifier {
    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Publish(aws_sdk_sns::error::DisplayErrorContext(&e).to_string())
            })?;

        tracing::info!(topic_arn = %self.topic_arn, "障害通知を発行しました");
        Ok(())
    }
}
