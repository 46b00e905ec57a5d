use crate::api::error::RelayError;
use crate::api::handlers::relay::InvocationResponse;
use crate::services::fetcher::fetch_into;
use crate::services::storage::{OBJECT_ACL, OBJECT_CONTENT_TYPE, ObjectStore, ObjectUpload};
use crate::utils::validation::{RelayRequest, object_key};
use reqwest::Url;
use serde_json::Value;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncSeekExt;
use tracing::{Instrument, info};

/// Fetch-and-relay: download a URL into a staging file, then PUT it to the object store.
pub struct RelayService {
    http: reqwest::Client,
    store: Arc<dyn ObjectStore>,
    staging_dir: PathBuf,
}

impl RelayService {
    pub fn new(http: reqwest::Client, store: Arc<dyn ObjectStore>, staging_dir: PathBuf) -> Self {
        Self {
            http,
            store,
            staging_dir,
        }
    }

    /// Run one invocation from an untyped payload. Never fails: every error
    /// becomes a 500 response.
    pub async fn handle(&self, payload: Value, invocation_id: &str) -> InvocationResponse {
        let span = tracing::info_span!("relay", invocation_id = %invocation_id);
        async {
            let result = match RelayRequest::from_payload(payload) {
                Ok(url) => self.relay(url).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(key) => InvocationResponse::success(format!("{} uploaded successfully", key)),
                Err(e) => e.into_response(),
            }
        }
        .instrument(span)
        .await
    }

    /// Relay a validated source URL. Returns the object key on success.
    pub async fn relay(&self, url: Url) -> Result<String, RelayError> {
        let key = object_key(&url)?;

        info!(%url, key = %key, "⬇️  DOWNLOAD");

        // The TempPath guard removes the staging file on every exit path.
        let (file, staged_path) = tempfile::Builder::new()
            .prefix(&staging_prefix(&key))
            .tempfile_in(&self.staging_dir)
            .map_err(RelayError::StagingCreate)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let size = fetch_into(&self.http, url, &mut file).await?;

        info!(key = %key, size, "☁️  UPLOAD");

        file.seek(SeekFrom::Start(0))
            .await
            .map_err(RelayError::Rewind)?;

        self.store
            .put_object(ObjectUpload {
                key: &key,
                body: file,
                acl: OBJECT_ACL,
                content_type: OBJECT_CONTENT_TYPE,
            })
            .await?;

        drop(staged_path);
        info!(key = %key, "✅ DONE");
        Ok(key)
    }
}

/// Longest key fragment kept in a staging file name; the random suffix and
/// separator must still fit within NAME_MAX (255 bytes).
const STAGING_PREFIX_MAX: usize = 200;

/// Staging file name prefix: the object key, cut on a char boundary so long
/// keys still yield a valid file name.
fn staging_prefix(key: &str) -> String {
    let mut end = key.len().min(STAGING_PREFIX_MAX);
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}.", &key[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_prefix_short_key() {
        assert_eq!(staging_prefix("data-2024.tar.xz"), "data-2024.tar.xz.");
    }

    #[test]
    fn test_staging_prefix_truncates_long_key() {
        let key = "a".repeat(300);
        let prefix = staging_prefix(&key);
        assert_eq!(prefix.len(), STAGING_PREFIX_MAX + 1);
        assert!(prefix.ends_with('.'));

        // Multi-byte chars straddling the cut are dropped whole.
        let key = "é".repeat(150);
        let prefix = staging_prefix(&key);
        assert!(prefix.len() <= STAGING_PREFIX_MAX + 1);
        assert!(prefix.trim_end_matches('.').chars().all(|c| c == 'é'));
    }
}
