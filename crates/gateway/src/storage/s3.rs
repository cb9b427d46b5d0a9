//! # S3互換ストレージ実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する
//! オブジェクトストレージ実装。

use filegate_types::StoredObject;

use super::{ObjectMetadata, ObjectStorage};
use crate::error::GatewayError;

/// S3互換ストレージによるオブジェクトストレージ実装。
pub struct S3ObjectStorage {
    bucket: s3::Bucket,
}

impl S3ObjectStorage {
    /// S3互換バケットから構築する。
    pub fn new(bucket: s3::Bucket) -> Self {
        Self { bucket }
    }

    /// バケット名とリージョンから構築する。
    ///
    /// 認証情報は標準のチェーン（環境変数、プロファイル、インスタンスメタデータ）から取得する。
    /// `endpoint` を指定した場合はS3互換サービスとみなし、パススタイルでアクセスする。
    pub fn connect(
        bucket_name: &str,
        region: &str,
        endpoint: Option<&str>,
    ) -> anyhow::Result<Self> {
        let credentials = s3::creds::Credentials::default()?;

        let bucket = match endpoint {
            Some(endpoint) => {
                tracing::info!(s3_endpoint = %endpoint, "S3互換エンドポイントを使用");
                let region = s3::Region::Custom {
                    region: region.to_string(),
                    endpoint: endpoint.to_string(),
                };
                s3::Bucket::new(bucket_name, region, credentials)?.with_path_style()
            }
            None => s3::Bucket::new(bucket_name, region.parse()?, credentials)?,
        };

        Ok(Self::new(*bucket))
    }
}

fn to_stored_object(object: s3::serde_types::Object) -> StoredObject {
    StoredObject {
        key: object.key,
        last_modified: object.last_modified,
        e_tag: object.e_tag,
        size: object.size,
        storage_class: object.storage_class,
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        content: &[u8],
        metadata: ObjectMetadata<'_>,
    ) -> Result<(), GatewayError> {
        // Content-Encodingはリクエストごとのヘッダとして付与する
        let mut bucket = self.bucket.clone();
        if let Some(encoding) = metadata.content_encoding {
            bucket.add_header("Content-Encoding", encoding);
        }

        let response = bucket
            .put_object_with_content_type(key, content, metadata.content_type)
            .await
            .map_err(|e| GatewayError::Storage(format!("PutObject failed: {e}")))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(GatewayError::Storage(format!(
                "PutObject returned HTTP {status}: {}",
                String::from_utf8_lossy(response.as_slice())
            )));
        }

        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<StoredObject>, GatewayError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let (page, _status) = self
                .bucket
                .list_page(String::new(), None, continuation_token.take(), None, None)
                .await
                .map_err(|e| GatewayError::Storage(format!("ListObjectsV2 failed: {e}")))?;

            objects.extend(page.contents.into_iter().map(to_stored_object));

            match page.next_continuation_token {
                Some(token) if page.is_truncated => continuation_token = Some(token),
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError> {
        self.bucket
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| GatewayError::Storage(format!("presigning GetObject failed: {e}")))
    }
}
