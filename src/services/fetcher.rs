use crate::api::error::RelayError;
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// HTTP client with pooled connections and bounded connect time. No overall
/// request deadline and no retries; redirects follow the client default.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .tcp_keepalive(TCP_KEEPALIVE)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build()
}

/// GET `url` and copy the whole body into `sink`. Returns the number of bytes written.
pub async fn fetch_into<W>(client: &Client, url: Url, sink: &mut W) -> Result<u64, RelayError>
where
    W: AsyncWrite + Unpin,
{
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(RelayError::Download)?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::BadStatus(status));
    }

    tracing::info!("📝 COPY: staging response body");

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| RelayError::Copy(std::io::Error::other(e)))?
    {
        sink.write_all(&chunk).await.map_err(RelayError::Copy)?;
        written += chunk.len() as u64;
    }
    sink.flush().await.map_err(RelayError::Copy)?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_into_buffer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data.bin")
            .with_status(200)
            .with_body("0123456789")
            .create_async()
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/data.bin", server.url())).unwrap();
        let mut sink = Vec::new();
        let written = fetch_into(&client, url, &mut sink).await.unwrap();

        mock.assert_async().await;
        assert_eq!(written, 10);
        assert_eq!(sink, b"0123456789");
    }

    #[tokio::test]
    async fn test_fetch_into_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/broken")
            .with_status(503)
            .create_async()
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/broken", server.url())).unwrap();
        let mut sink = Vec::new();
        let err = fetch_into(&client, url, &mut sink).await.unwrap_err();

        assert_eq!(err.to_string(), "bad HTTP status: 503 Service Unavailable");
        assert!(sink.is_empty());
    }
}
