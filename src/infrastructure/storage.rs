use crate::api::error::RelayError;
use crate::config::StoreConfig;
use aws_sdk_s3::config::{Credentials, Region, RequestChecksumCalculation};
use reqwest::Url;
use tracing::info;

/// Build an S3 client session for the configured B2 endpoint.
pub async fn setup_storage(config: &StoreConfig) -> Result<aws_sdk_s3::Client, RelayError> {
    let endpoint_url = config.endpoint_url();
    Url::parse(&endpoint_url)
        .map_err(|e| RelayError::Session(format!("invalid endpoint {}: {}", endpoint_url, e)))?;

    let region = config.region();
    if region.is_empty() {
        return Err(RelayError::Session(format!(
            "cannot derive region from endpoint {}",
            config.endpoint
        )));
    }

    info!(
        "☁️  S3 Storage: {} (Region: {}, Bucket: {})",
        endpoint_url, region, config.bucket
    );

    let aws_config = aws_config::from_env()
        .endpoint_url(&endpoint_url)
        .region(Region::new(region.to_string()))
        .credentials_provider(Credentials::new(
            config.key_id.clone(),
            config.app_key.clone(),
            None,
            None,
            "static",
        ))
        .load()
        .await;

    // B2 accepts path-style requests, which also work for IP and localhost endpoints.
    // Checksums only when an operation requires them: PutObject goes out as a
    // plain signed body, not aws-chunked with a checksum trailer.
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
        .build();
    Ok(aws_sdk_s3::Client::from_conf(s3_config))
}
