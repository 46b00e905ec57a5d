use crate::api::error::RelayError;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Invocation payload: `{"URL": "<absolute url>"}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RelayRequest {
    #[serde(rename = "URL")]
    #[validate(url)]
    pub url: String,
}

impl RelayRequest {
    /// Parse and validate an untyped invocation payload, returning the source URL
    pub fn from_payload(payload: Value) -> Result<Url, RelayError> {
        let request: Self = serde_json::from_value(payload)
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
        request.validate_url()
    }

    /// Check the URL and return it parsed
    pub fn validate_url(&self) -> Result<Url, RelayError> {
        self.validate()
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
        Url::parse(&self.url).map_err(|e| RelayError::InvalidRequest(format!("URL: {}", e)))
    }
}

/// Object key for a source URL: its last non-empty path segment.
pub fn object_key(url: &Url) -> Result<String, RelayError> {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| RelayError::MissingObjectKey(url.to_string()))
}
