use crate::api::handlers::relay::InvocationResponse;
use thiserror::Error;

/// Failure of a single relay invocation, tagged by the step that produced it
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("URL has no path segment to use as object key: {0}")]
    MissingObjectKey(String),

    #[error("failed to create temp file: {0}")]
    StagingCreate(#[source] std::io::Error),

    #[error("failed to download file: {0}")]
    Download(#[source] reqwest::Error),

    #[error("bad HTTP status: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("failed to write to temp file: {0}")]
    Copy(#[source] std::io::Error),

    #[error("failed to rewind temp file: {0}")]
    Rewind(#[source] std::io::Error),

    #[error("failed to create storage session: {0}")]
    Session(String),

    #[error("upload failed: {0}")]
    Upload(String),
}

impl RelayError {
    /// Short step name, used as a structured log field
    pub fn step(&self) -> &'static str {
        match self {
            RelayError::InvalidRequest(_) | RelayError::MissingObjectKey(_) => "validate",
            RelayError::StagingCreate(_) => "stage",
            RelayError::Download(_) | RelayError::BadStatus(_) => "download",
            RelayError::Copy(_) => "copy",
            RelayError::Rewind(_) => "rewind",
            RelayError::Session(_) => "session",
            RelayError::Upload(_) => "upload",
        }
    }

    pub fn into_response(self) -> InvocationResponse {
        tracing::error!(step = self.step(), "❌ Relay failed: {}", self);
        InvocationResponse::failure(format!("Error: {}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_message() {
        let err = RelayError::BadStatus(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "bad HTTP status: 404 Not Found");
        assert_eq!(err.step(), "download");
    }

    #[test]
    fn test_into_response() {
        let err = RelayError::Upload("access denied".to_string());
        let response = err.into_response();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Error: upload failed: access denied");
    }

    #[test]
    fn test_io_errors_keep_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            RelayError::StagingCreate(io).to_string(),
            "failed to create temp file: denied"
        );
    }
}
