//! INSECURE: direct calls to the upstream provider from the client.
//!
//! The provider URL, API key included, is embedded in the client and shown to
//! the user on success. This path exists to demonstrate the leak; use the relay
//! (`fetch_last_block_backend`, `fetch_gas_price`) for anything real.

use std::sync::Arc;
use tracing::{error, instrument};

use super::DappClient;
use crate::{models::units::format_ether, rpc::UpstreamRpc};

pub const CONNECT_FOR_DIRECT_BALANCE: &str = "Please connect your wallet first (MetaMask) to obtain your account address and fetch its balance.";
pub const DIRECT_BALANCE_FAILED: &str = "Error fetching balance via Alchemy.";

/// Upstream client built from a credential embedded in the client
pub struct DirectUpstream {
    rpc: Arc<dyn UpstreamRpc>,
    rpc_url: String,
}

impl DirectUpstream {
    pub fn new(rpc: Arc<dyn UpstreamRpc>, rpc_url: impl Into<String>) -> Self {
        Self {
            rpc,
            rpc_url: rpc_url.into(),
        }
    }

    /// The embedded URL, key and all
    pub fn exposed_url(&self) -> &str {
        &self.rpc_url
    }
}

impl DappClient {
    /// Balance of the connected account, fetched with the embedded key
    ///
    /// Requires a connected wallet address; without one only the guidance
    /// message is set and no request is made.
    #[instrument(skip(self))]
    pub async fn fetch_balance_direct(&mut self) {
        self.state.notice = None;
        self.state.direct_error = None;

        let Some(address) = self.state.user_address else {
            self.state.direct_error = Some(CONNECT_FOR_DIRECT_BALANCE.to_string());
            self.state.balance_direct = None;
            self.state.rpc_url_visible = false;
            return;
        };

        match self.direct.rpc.balance(address).await {
            Ok(wei) => {
                self.state.balance_direct = Some(format_ether(wei));
                self.state.rpc_url_visible = true;
            }
            Err(e) => {
                error!("{:#}", e);
                self.state.direct_error = Some(DIRECT_BALANCE_FAILED.to_string());
                self.state.balance_direct = None;
                self.state.rpc_url_visible = false;
            }
        }
    }

    /// Balance of the HelloWorld contract, fetched with the embedded key
    #[instrument(skip(self))]
    pub async fn fetch_contract_balance(&mut self) {
        self.state.notice = None;
        match self.direct.rpc.balance(self.contract).await {
            Ok(wei) => self.state.contract_balance = Some(format_ether(wei)),
            Err(e) => error!("{:#}", e),
        }
    }

    /// Embedded provider URL, once it has been revealed by a direct call
    pub fn visible_rpc_url(&self) -> Option<&str> {
        self.state
            .rpc_url_visible
            .then(|| self.direct.exposed_url())
    }
}
