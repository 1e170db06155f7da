use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};

use crate::error::BoxError;

/// The network half of a listing fetch: one GET, the raw body back.
///
/// Non-success HTTP statuses count as transport failures.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, url: Url, user_agent: &str) -> Result<Vec<u8>, BoxError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    cli: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport { cli: Client::new() }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url, user_agent: &str) -> Result<Vec<u8>, BoxError> {
        let res = self
            .cli
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.bytes().await?.to_vec())
    }
}
