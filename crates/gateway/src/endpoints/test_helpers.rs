//! # エンドポイントテスト用共通ヘルパー
//!
//! メモリ内のモックストレージと、テスト用Gatewayサーバーの起動。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use filegate_types::StoredObject;

use crate::config::{GatewayState, PRESIGN_EXPIRY_SECS};
use crate::endpoints::health::OutcomePicker;
use crate::error::GatewayError;
use crate::storage::{ObjectMetadata, ObjectStorage};

/// モックストレージに保存されたオブジェクト。
#[derive(Debug, Clone)]
pub struct MockObject {
    pub content: Vec<u8>,
    pub content_type: String,
    pub content_encoding: Option<String>,
}

/// テスト用のモックストレージ。
/// S3への接続なしでオブジェクトをメモリ内に保持する。
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<BTreeMap<String, MockObject>>,
    presigned: Mutex<Vec<String>>,
    /// 設定されている場合、全操作がこのメッセージで失敗する
    fail_with: Option<String>,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        })
    }

    pub fn get(&self, key: &str) -> Option<MockObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }

    pub fn presigned_keys(&self) -> Vec<String> {
        self.presigned.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), GatewayError> {
        match &self.fail_with {
            Some(message) => Err(GatewayError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for MockStorage {
    async fn put_object(
        &self,
        key: &str,
        content: &[u8],
        metadata: ObjectMetadata<'_>,
    ) -> Result<(), GatewayError> {
        self.check()?;
        self.objects.lock().unwrap().insert(
            key.to_string(),
            MockObject {
                content: content.to_vec(),
                content_type: metadata.content_type.to_string(),
                content_encoding: metadata.content_encoding.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<StoredObject>, GatewayError> {
        self.check()?;
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|(key, object)| StoredObject {
                key: key.clone(),
                last_modified: "2024-01-01T00:00:00.000Z".to_string(),
                e_tag: None,
                size: object.content.len() as u64,
                storage_class: Some("STANDARD".to_string()),
            })
            .collect())
    }

    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError> {
        self.check()?;
        self.presigned.lock().unwrap().push(key.to_string());
        Ok(format!(
            "https://mock-storage.local/test-bucket/{}?X-Amz-Expires={expiry_secs}&X-Amz-Signature=test",
            key.replace(' ', "%20")
        ))
    }
}

/// 常に同じインデックスを返す乱数源
pub struct FixedPicker(pub usize);

impl OutcomePicker for FixedPicker {
    fn pick(&self, _len: usize) -> usize {
        self.0
    }
}

/// テスト用GatewayStateを構築するヘルパー
pub fn test_state(storage: Arc<MockStorage>) -> Arc<GatewayState> {
    test_state_with_picker(storage, FixedPicker(0))
}

pub fn test_state_with_picker(
    storage: Arc<MockStorage>,
    picker: impl OutcomePicker + 'static,
) -> Arc<GatewayState> {
    Arc::new(GatewayState {
        bucket_name: "test-bucket".to_string(),
        storage,
        outcome_picker: Box::new(picker),
        presign_expiry_secs: PRESIGN_EXPIRY_SECS,
    })
}

/// テスト用Gatewayサーバーを起動し、ポート番号を返す。
pub async fn start_gateway(state: Arc<GatewayState>) -> u16 {
    let app = super::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    port
}
