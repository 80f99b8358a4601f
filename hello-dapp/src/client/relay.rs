use async_trait::async_trait;
use eyre::Result;
use mockall::automock;

use crate::models::relay::{BlockNumberResponse, GasPriceResponse};

/// Queries the client sends to the relay instead of to the keyed provider
#[automock]
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn last_block(&self) -> Result<u64>;

    /// Gas price in wei as a decimal string, `None` if unavailable
    async fn gas_price(&self) -> Result<Option<String>>;
}

/// HTTP client for the relay endpoints
#[derive(Clone)]
pub struct HttpRelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RelayApi for HttpRelayClient {
    async fn last_block(&self) -> Result<u64> {
        let body: BlockNumberResponse = self
            .http
            .get(self.endpoint(super::LAST_BLOCK_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.block_number)
    }

    async fn gas_price(&self) -> Result<Option<String>> {
        let body: GasPriceResponse = self
            .http
            .get(self.endpoint(super::GAS_PRICE_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.gas_price)
    }
}
