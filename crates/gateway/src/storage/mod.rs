//! # オブジェクトストレージ
//!
//! Gatewayが委譲するオブジェクトストレージの抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

pub mod s3;

pub use self::s3::S3ObjectStorage;

use filegate_types::StoredObject;

use crate::error::GatewayError;

/// アップロード時に宣言するメタデータ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMetadata<'a> {
    /// `Content-Type` ヘッダ
    pub content_type: &'a str,
    /// `Content-Encoding` ヘッダ（宣言のみ。本体の変換は行わない）
    pub content_encoding: Option<&'a str>,
}

/// オブジェクトストレージの抽象インターフェース。
///
/// 各メソッドは外部サービスへの呼び出しを高々1回（リストはページごとに1回）行い、
/// リトライはしない。
#[async_trait::async_trait]
pub trait ObjectStorage: Send + Sync {
    /// `key` にバイト列を書き込む。
    async fn put_object(
        &self,
        key: &str,
        content: &[u8],
        metadata: ObjectMetadata<'_>,
    ) -> Result<(), GatewayError>;

    /// バケット内の全オブジェクトを列挙する。
    /// 結果が複数ページに分かれる場合は継続トークンを辿って全ページを連結する。
    async fn list_objects(&self) -> Result<Vec<StoredObject>, GatewayError>;

    /// `key` の署名付きダウンロードURL（GET）を生成する。
    /// オブジェクトの存在確認は行わない。
    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError>;
}
