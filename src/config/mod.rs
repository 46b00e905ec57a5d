use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
}

/// Object store target (Backblaze B2 S3-compatible API)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Endpoint hostname, e.g. `s3.us-west-002.backblazeb2.com`
    pub endpoint: String,

    /// Access key identifier
    pub key_id: String,

    /// Access key secret
    pub app_key: String,

    /// Destination bucket
    pub bucket: String,
}

impl StoreConfig {
    /// Load store configuration from `B2_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: required("B2_ENDPOINT")?,
            key_id: required("B2_KEY_ID")?,
            app_key: required("B2_APP_KEY")?,
            bucket: required("B2_BUCKET")?,
        })
    }

    /// Endpoint host with any scheme and path removed
    pub fn host(&self) -> &str {
        let rest = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);
        rest.split('/').next().unwrap_or(rest)
    }

    /// Region encoded in the endpoint host: `s3.<region>.<provider domain>`.
    pub fn region(&self) -> &str {
        let host = self.host();
        let host = host.strip_prefix("s3.").unwrap_or(host);
        host.split('.').next().unwrap_or(host)
    }

    /// Endpoint as a URL usable by the S3 client. Bare hostnames default to https.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            format!("https://{}", self.endpoint)
        }
    }
}

/// Process-wide configuration, built once at startup
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub store: StoreConfig,

    /// Directory holding staging files (default: OS temp dir)
    pub staging_dir: PathBuf,
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            staging_dir: env::var("RELAY_STAGING_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
