use super::client::HttpClient;
use async_trait::async_trait;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`reqwest::Client`] that hands back archive files byte for byte.
///
/// Transparent content decoding stays off: a mirror serving `.csv.gz` with
/// `Content-Encoding: gzip` must still yield the compressed file. Timeouts
/// and the redirect policy are library defaults; the release archive answers
/// through a redirect to object storage.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .no_gzip()
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
