use crate::error::Result;
use async_trait::async_trait;

// ipify answers with the bare address as plain text
pub const IP_SERVICE_URL: &str = "https://api.ipify.org";

#[async_trait]
pub trait IpResolver: Send + Sync {
    async fn current_ip(&self) -> Result<String>;
}

pub struct HttpIpResolver {
    client: reqwest::Client,
    url: String,
}

impl HttpIpResolver {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl IpResolver for HttpIpResolver {
    /// Returns the service's answer trimmed; the address is not validated.
    async fn current_ip(&self) -> Result<String> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body.trim().to_string())
    }
}
