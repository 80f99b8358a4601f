//! Terminal front-end for the Hello dApp client.
//!
//! Actions run in order within one session, so `connect balance-direct` first
//! connects the wallet and then uses its address.

use clap::{Parser, ValueEnum};
use eyre::{Result, WrapErr};
use hello_dapp::{
    client::{
        insecure::DirectUpstream,
        relay::{HttpRelayClient, RelayApi},
        wallet::{InjectedWallet, LocalWallet},
        DappClient, GAS_PRICE_PATH, LAST_BLOCK_PATH,
    },
    config::ClientConfig,
    contract::ContractAddressFile,
    logging,
    rpc::{EthereumClient, UpstreamRpc},
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Action {
    /// Connect wallet and load the contract message
    Connect,
    /// Send setMessage with --message
    UpdateMessage,
    /// Balance via the wallet
    Balance,
    /// Balance via the embedded provider URL (insecure)
    BalanceDirect,
    /// Last block via the relay
    LastBlock,
    /// Gas price via the relay
    GasPrice,
    /// Contract balance via the embedded provider URL (insecure)
    ContractBalance,
}

#[derive(Parser, Debug)]
#[command(name = "dapp-cli", about = "Hello dApp from the terminal")]
struct Cli {
    /// Actions to run, in order
    #[arg(value_enum, required = true)]
    actions: Vec<Action>,

    /// New message for update-message
    #[arg(long, default_value = "")]
    message: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    let contract = ContractAddressFile::load(&config.contract_address_path)
        .wrap_err_with(|| {
            format!(
                "reading contract address from {}",
                config.contract_address_path.display()
            )
        })?
        .address;

    let wallet = match &config.wallet_private_key {
        Some(key) => Some(
            Arc::new(LocalWallet::new(&config.wallet_rpc_url, key)?) as Arc<dyn InjectedWallet>
        ),
        None => None,
    };
    let relay: Arc<dyn RelayApi> = Arc::new(HttpRelayClient::new(&config.backend_url));
    let direct_rpc: Arc<dyn UpstreamRpc> = Arc::new(EthereumClient::new(&config.direct_rpc_url)?);
    let direct = DirectUpstream::new(direct_rpc, config.direct_rpc_url.clone());

    let mut client = DappClient::new(wallet, relay, direct, contract);
    client.set_new_message(cli.message);

    for action in cli.actions {
        match action {
            Action::Connect => client.connect_wallet_and_load_message().await,
            Action::UpdateMessage => client.update_message().await,
            Action::Balance => client.fetch_balance_wallet().await,
            Action::BalanceDirect => client.fetch_balance_direct().await,
            Action::LastBlock => client.fetch_last_block_backend().await,
            Action::GasPrice => client.fetch_gas_price().await,
            Action::ContractBalance => client.fetch_contract_balance().await,
        }
    }

    render(&client);
    Ok(())
}

fn render(client: &DappClient) {
    let state = client.state();

    if let Some(notice) = &state.notice {
        println!("! {notice}");
    }
    match state.user_address {
        Some(address) => println!("Address: {address}"),
        None => println!("Address: Not connected"),
    }
    if !state.current_message.is_empty() {
        println!("Message: {}", state.current_message);
    }
    if state.update_success {
        println!("Message updated!");
    }
    if let Some(balance) = &state.balance_wallet {
        println!("Balance: {balance} ETH");
    }
    if let Some(err) = &state.direct_error {
        println!("Error: {err}");
    }
    if let Some(balance) = &state.balance_direct {
        println!("Balance (direct): {balance} ETH");
    }
    if let Some(url) = client.visible_rpc_url() {
        println!("RPC URL: {url}");
    }
    if let Some(block) = state.last_block {
        println!("Last Block Number: {block}");
    }
    if state.backend_url_visible {
        println!("Backend URL: {LAST_BLOCK_PATH}");
    }
    if let Some(gas_price) = &state.gas_price {
        println!("Gas Price (wei): {gas_price}");
    }
    if state.gas_price_api_visible {
        println!("API URL: {GAS_PRICE_PATH}");
    }
    if let Some(balance) = &state.contract_balance {
        println!("Contract Balance: {balance} ETH");
    }
}
