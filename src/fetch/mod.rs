//! Single-attempt HTTP download of archive partitions.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use bytes::Bytes;
use tracing::{debug, info};

use crate::dataset::DatasetKey;
use crate::error::FetchError;

/// Issues one GET for `url` and returns the full response body.
///
/// # Errors
///
/// Returns [`FetchError::Status`] for any non-2xx response and
/// [`FetchError::Transport`] when the request or body read fails.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, FetchError> {
    let parsed = url.parse().map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let transport = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let resp = client.execute(req).await.map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = resp.bytes().await.map_err(transport)?;
    debug!(url, bytes = body.len(), "Response body received");
    Ok(body)
}

/// Downloads the compressed file for `key` from the archive rooted at `base_url`.
pub async fn fetch_partition<C: HttpClient>(
    client: &C,
    base_url: &str,
    key: &DatasetKey,
) -> Result<Bytes, FetchError> {
    let url = key.url(base_url);
    info!("Downloading: {}...", url);
    fetch_bytes(client, &url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = BasicClient::new().unwrap();
        let result = fetch_bytes(&client, "not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind an ephemeral port, then free it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = BasicClient::new().unwrap();
        let url = format!("http://127.0.0.1:{}/missing.csv.gz", port);
        let result = fetch_bytes(&client, &url).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
