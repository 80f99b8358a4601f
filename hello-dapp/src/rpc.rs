use std::sync::Arc;

use alloy::{
    // Import the pre-defined typed Ethereum network
    network::Ethereum,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    transports::RpcError,
};
use async_trait::async_trait;
use eyre::Result;
use mockall::automock;
use tracing::{info, warn};

/// Read-only queries answered by an upstream RPC provider
///
/// The relay handlers and the dApp client depend on this trait rather than on a
/// concrete provider, so a process builds one client at start-up and hands it
/// to everything that needs it.
#[automock]
#[async_trait]
pub trait UpstreamRpc: Send + Sync {
    /// Current block height
    async fn block_number(&self) -> Result<u64>;

    /// Current gas price in wei, if the provider reports one
    async fn gas_price(&self) -> Result<Option<u128>>;

    /// Native balance of `address` at the latest block, in wei
    async fn balance(&self, address: Address) -> Result<U256>;
}

/// Ethereum RPC client for blockchain interactions
///
/// This client provides a typed interface for communicating with Ethereum nodes.
/// It uses the Alloy typed providers to ensure type safety in RPC interactions.
#[derive(Clone)]
pub struct EthereumClient {
    /// Typed provider for Ethereum network
    pub provider: Arc<dyn Provider<Ethereum>>,
}

impl EthereumClient {
    /// Create a new Ethereum client with an HTTP provider
    ///
    /// No request is issued here; an unreachable endpoint surfaces on the first
    /// query instead of preventing the process from starting.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - URL of the Ethereum RPC endpoint
    pub fn new(rpc_url: &str) -> Result<Self> {
        // Create a provider for the Ethereum network at the specified URL
        let provider = ProviderBuilder::new()
            .network::<Ethereum>()
            .on_http(rpc_url.parse()?);

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Query the endpoint once and log the outcome
    ///
    /// Used at start-up for visibility only; a failed check is not fatal.
    pub async fn check_connection(&self) -> bool {
        match self.provider.get_block_number().await {
            Ok(block_number) => {
                info!(block_number, "Connected to upstream RPC provider");
                true
            }
            Err(e) => {
                warn!(error = %e, "Upstream RPC provider not reachable yet");
                false
            }
        }
    }
}

#[async_trait]
impl UpstreamRpc for EthereumClient {
    async fn block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn gas_price(&self) -> Result<Option<u128>> {
        match self.provider.get_gas_price().await {
            Ok(gas_price) => Ok(Some(gas_price)),
            // The node answered but has no price to give
            Err(RpcError::ErrorResp(payload)) => {
                warn!(code = payload.code, message = %payload.message, "Upstream reported no gas price");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }
}
