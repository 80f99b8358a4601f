//! One-shot deployment of the HelloWorld contract.

use crate::{contract::ContractAddressFile, error::DeployError};
use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// Compiled contract as emitted by Hardhat (`artifacts/**/<Name>.json`)
///
/// Only the fields needed for deployment are read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    #[serde(default)]
    pub contract_name: Option<String>,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact and make sure it carries creation code
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let raw = fs::read_to_string(path).map_err(|source| DeployError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self =
            serde_json::from_str(&raw).map_err(|source| DeployError::ArtifactParse {
                path: path.to_path_buf(),
                source,
            })?;

        if artifact.bytecode.is_empty() {
            return Err(DeployError::EmptyBytecode(path.to_path_buf()));
        }
        Ok(artifact)
    }
}

/// Sends a contract-creation transaction and reports where it landed
#[automock]
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    async fn deploy(&self, bytecode: Bytes) -> Result<Address, DeployError>;
}

/// Deployer signing with a local private key over HTTP
pub struct AlloyDeployer {
    provider: DynProvider,
    from: Address,
}

impl AlloyDeployer {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self, DeployError> {
        let key_hex = private_key.strip_prefix("0x").unwrap_or(private_key);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| DeployError::InvalidKey(format!("{e}")))?;
        let from = signer.address();

        let url = rpc_url
            .parse::<reqwest::Url>()
            .map_err(|e| DeployError::InvalidRpcUrl(format!("{e}")))?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .on_http(url)
            .erased();

        info!(deployer = %from, "Deployer wallet ready");
        Ok(Self { provider, from })
    }

    pub fn address(&self) -> Address {
        self.from
    }
}

#[async_trait]
impl ContractDeployer for AlloyDeployer {
    async fn deploy(&self, bytecode: Bytes) -> Result<Address, DeployError> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(bytecode);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))?;
        debug!(tx_hash = %pending.tx_hash(), "Deployment transaction sent");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))?;
        if !receipt.status() {
            return Err(DeployError::Transaction(format!(
                "transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        receipt
            .contract_address
            .ok_or(DeployError::MissingContractAddress)
    }
}

/// Destinations of the deployment record
#[derive(Debug, Clone)]
pub struct DeployOutputs {
    pub deployments_path: PathBuf,
    pub frontend_path: PathBuf,
}

impl DeployOutputs {
    fn paths(&self) -> [&Path; 2] {
        [&self.deployments_path, &self.frontend_path]
    }
}

/// Deploy HelloWorld and record its address in both output locations
///
/// Each run overwrites the previous record. A failure at any step aborts the
/// run; files written before the failure are left as they are.
#[instrument(skip(deployer, artifact), fields(contract = ?artifact.contract_name))]
pub async fn deploy_hello_world(
    deployer: &dyn ContractDeployer,
    artifact: &ContractArtifact,
    outputs: &DeployOutputs,
) -> Result<Address, DeployError> {
    let address = deployer.deploy(artifact.bytecode.clone()).await?;
    info!(%address, "HelloWorld smart contract deployed");

    let record = ContractAddressFile::new(address);
    for path in outputs.paths() {
        record
            .store(path)
            .map_err(|source| DeployError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Deployment record written");
    }

    Ok(address)
}
