//! dApp client: the event handlers and UI state of the Hello dApp page.
//!
//! Every operation is a single attempt. Failures are logged and folded into
//! [`DappState`]; nothing is returned to the caller, mirroring buttons that
//! either update the page or leave it as it was.

pub mod insecure;
pub mod relay;
pub mod wallet;

use alloy::primitives::Address;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::units::format_ether;
use insecure::DirectUpstream;
use relay::RelayApi;
use wallet::InjectedWallet;

pub const INSTALL_WALLET_NOTICE: &str = "Please install MetaMask.";
pub const NO_ACCOUNTS_NOTICE: &str = "No accounts found.";
pub const CONNECT_FIRST_NOTICE: &str = "Please connect wallet first.";
pub const GAS_PRICE_UNAVAILABLE: &str = "Not available";

/// Relay path shown to the user after a successful block query
pub const LAST_BLOCK_PATH: &str = "/api/getLastBlock";

/// Relay path shown to the user after a successful gas price query
pub const GAS_PRICE_PATH: &str = "/api/getGasPrice";

/// Everything the page displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DappState {
    pub user_address: Option<Address>,
    pub balance_wallet: Option<String>,

    // Insecure direct path
    pub balance_direct: Option<String>,
    pub rpc_url_visible: bool,
    pub direct_error: Option<String>,

    // Relay path
    pub last_block: Option<u64>,
    pub backend_url_visible: bool,
    pub gas_price: Option<String>,
    pub gas_price_api_visible: bool,

    pub contract_balance: Option<String>,

    // Message contract
    pub current_message: String,
    pub new_message: String,
    pub update_success: bool,

    /// Guidance shown in place of a blocking alert
    pub notice: Option<String>,
}

/// Session of the dApp page
pub struct DappClient {
    wallet: Option<Arc<dyn InjectedWallet>>,
    relay: Arc<dyn RelayApi>,
    direct: DirectUpstream,
    contract: Address,
    state: DappState,
}

impl DappClient {
    /// `wallet` is `None` when no wallet is available, like a browser without
    /// the extension installed.
    pub fn new(
        wallet: Option<Arc<dyn InjectedWallet>>,
        relay: Arc<dyn RelayApi>,
        direct: DirectUpstream,
        contract: Address,
    ) -> Self {
        Self {
            wallet,
            relay,
            direct,
            contract,
            state: DappState::default(),
        }
    }

    pub fn state(&self) -> &DappState {
        &self.state
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    /// Text typed into the message box
    pub fn set_new_message(&mut self, message: impl Into<String>) {
        self.state.new_message = message.into();
    }

    fn notify(&mut self, notice: &str) {
        warn!(notice, "User guidance");
        self.state.notice = Some(notice.to_string());
    }

    fn wallet_or_notify(&mut self) -> Option<Arc<dyn InjectedWallet>> {
        let wallet = self.wallet.clone();
        if wallet.is_none() {
            self.notify(INSTALL_WALLET_NOTICE);
        }
        wallet
    }

    /// Request account access, then load the contract's current message
    #[instrument(skip(self))]
    pub async fn connect_wallet_and_load_message(&mut self) {
        self.state.notice = None;
        let Some(wallet) = self.wallet_or_notify() else {
            return;
        };

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!("Error connecting wallet or loading message: {:#}", e);
                return;
            }
        };
        let Some(account) = accounts.first().copied() else {
            self.notify(NO_ACCOUNTS_NOTICE);
            return;
        };
        self.state.user_address = Some(account);
        info!(%account, "Wallet connected");

        match wallet.read_message(self.contract).await {
            Ok(message) => {
                self.state.current_message = message;
                self.state.update_success = false;
            }
            Err(e) => error!("Error connecting wallet or loading message: {:#}", e),
        }
    }

    /// Send `setMessage(new_message)` and wait for one confirmation
    ///
    /// On any failure, including the user rejecting the signature, the
    /// displayed message stays as it was.
    #[instrument(skip(self))]
    pub async fn update_message(&mut self) {
        self.state.notice = None;
        let Some(wallet) = self.wallet_or_notify() else {
            return;
        };
        if self.state.user_address.is_none() {
            self.notify(CONNECT_FIRST_NOTICE);
            return;
        }

        let message = self.state.new_message.clone();
        match wallet.set_message(self.contract, message.clone()).await {
            Ok(tx_hash) => {
                info!(%tx_hash, "Message updated");
                self.state.current_message = message;
                self.state.update_success = true;
                self.state.new_message.clear();
            }
            Err(e) => {
                error!("Error updating message: {:#}", e);
                self.state.update_success = false;
            }
        }
    }

    /// Native balance of the wallet's signer, read through the wallet
    #[instrument(skip(self))]
    pub async fn fetch_balance_wallet(&mut self) {
        self.state.notice = None;
        let Some(wallet) = self.wallet_or_notify() else {
            return;
        };

        let result = async {
            let address = wallet.signer_address().await?;
            let wei = wallet.balance(address).await?;
            eyre::Ok((address, wei))
        }
        .await;

        match result {
            Ok((address, wei)) => {
                self.state.user_address = Some(address);
                self.state.balance_wallet = Some(format_ether(wei));
            }
            Err(e) => error!("{:#}", e),
        }
    }

    /// Block height through the relay; the provider key never reaches the client
    #[instrument(skip(self))]
    pub async fn fetch_last_block_backend(&mut self) {
        self.state.notice = None;
        match self.relay.last_block().await {
            Ok(block_number) => {
                self.state.last_block = Some(block_number);
                self.state.backend_url_visible = true;
            }
            Err(e) => error!("{:#}", e),
        }
    }

    /// Gas price through the relay
    #[instrument(skip(self))]
    pub async fn fetch_gas_price(&mut self) {
        self.state.notice = None;
        match self.relay.gas_price().await {
            Ok(gas_price) => {
                self.state.gas_price =
                    Some(gas_price.unwrap_or_else(|| GAS_PRICE_UNAVAILABLE.to_string()));
                self.state.gas_price_api_visible = true;
            }
            Err(e) => {
                error!("{:#}", e);
                self.state.gas_price = None;
                self.state.gas_price_api_visible = false;
            }
        }
    }
}
