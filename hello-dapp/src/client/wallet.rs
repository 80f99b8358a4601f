use alloy::{
    network::EthereumWallet,
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use eyre::{ensure, Result};
use mockall::automock;
use tracing::debug;

use crate::contract::IHelloWorld;

/// Account access and signing capability offered to the page
#[automock]
#[async_trait]
pub trait InjectedWallet: Send + Sync {
    /// Ask the user for account access; may come back empty
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Account that signs transactions
    async fn signer_address(&self) -> Result<Address>;

    /// Native balance in wei
    async fn balance(&self, address: Address) -> Result<U256>;

    /// `message()` of the HelloWorld contract
    async fn read_message(&self, contract: Address) -> Result<String>;

    /// `setMessage(message)`, resolved after one confirmation
    async fn set_message(&self, contract: Address, message: String) -> Result<TxHash>;
}

/// Wallet backed by a local private key
pub struct LocalWallet {
    provider: DynProvider,
    address: Address,
}

impl LocalWallet {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let key_hex = private_key.strip_prefix("0x").unwrap_or(private_key);
        let signer: PrivateKeySigner = key_hex.parse()?;
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .on_http(rpc_url.parse::<reqwest::Url>()?)
            .erased();

        Ok(Self { provider, address })
    }
}

#[async_trait]
impl InjectedWallet for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![self.address])
    }

    async fn signer_address(&self) -> Result<Address> {
        Ok(self.address)
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn read_message(&self, contract: Address) -> Result<String> {
        let hello = IHelloWorld::new(contract, self.provider.clone());
        Ok(hello.message().call().await?._0)
    }

    async fn set_message(&self, contract: Address, message: String) -> Result<TxHash> {
        let hello = IHelloWorld::new(contract, self.provider.clone());
        let pending = hello.setMessage(message).send().await?;
        debug!(tx_hash = %pending.tx_hash(), "setMessage sent");

        let receipt = pending
            .with_required_confirmations(1)
            .get_receipt()
            .await?;
        ensure!(
            receipt.status(),
            "setMessage transaction {} reverted",
            receipt.transaction_hash
        );
        Ok(receipt.transaction_hash)
    }
}
