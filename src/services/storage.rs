use crate::api::error::RelayError;
use crate::config::StoreConfig;
use crate::infrastructure::storage::setup_storage;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use tokio::sync::OnceCell;
use tracing::debug;

/// Canned ACL applied to every relayed object
pub const OBJECT_ACL: &str = "private";

/// Content type applied to every relayed object; the relay mirrors xz archives.
pub const OBJECT_CONTENT_TYPE: &str = "application/x-xz";

/// A single whole-object PUT
#[derive(Debug)]
pub struct ObjectUpload<'a> {
    pub key: &'a str,
    /// Staged file, positioned at its start
    pub body: tokio::fs::File,
    pub acl: &'a str,
    pub content_type: &'a str,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, upload: ObjectUpload<'_>) -> Result<(), RelayError>;
}

/// S3-compatible store. The client session is built on first use and reused
/// by later invocations in the same process.
pub struct S3ObjectStore {
    config: StoreConfig,
    client: OnceCell<Client>,
}

impl S3ObjectStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client, RelayError> {
        self.client
            .get_or_try_init(|| setup_storage(&self.config))
            .await
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, upload: ObjectUpload<'_>) -> Result<(), RelayError> {
        let client = self.client().await?;

        let body = ByteStream::read_from()
            .file(upload.body)
            .build()
            .await
            .map_err(|e| RelayError::Upload(e.to_string()))?;

        let output = client
            .put_object()
            .bucket(&self.config.bucket)
            .key(upload.key)
            .body(body)
            .acl(ObjectCannedAcl::from(upload.acl))
            .content_type(upload.content_type)
            .send()
            .await
            .map_err(|e| RelayError::Upload(DisplayErrorContext(&e).to_string()))?;

        debug!(key = upload.key, etag = ?output.e_tag(), "PutObject complete");
        Ok(())
    }
}
