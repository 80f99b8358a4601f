//! Behaviour of the dApp client handlers against substituted wallet, relay and provider

use alloy::primitives::{address, Address, TxHash, U256};
use std::sync::Arc;

use hello_dapp::{
    client::{
        insecure::{DirectUpstream, CONNECT_FOR_DIRECT_BALANCE, DIRECT_BALANCE_FAILED},
        relay::{MockRelayApi, RelayApi},
        wallet::{InjectedWallet, MockInjectedWallet},
        DappClient, CONNECT_FIRST_NOTICE, GAS_PRICE_UNAVAILABLE, INSTALL_WALLET_NOTICE,
        NO_ACCOUNTS_NOTICE,
    },
    rpc::{MockUpstreamRpc, UpstreamRpc},
};

const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
const ACCOUNT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const EMBEDDED_URL: &str = "https://eth-sepolia.example/v2/ABC123demoKey";

fn one_ether() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

fn client(
    wallet: Option<MockInjectedWallet>,
    relay: MockRelayApi,
    direct: MockUpstreamRpc,
) -> DappClient {
    let wallet = wallet.map(|w| Arc::new(w) as Arc<dyn InjectedWallet>);
    let direct = DirectUpstream::new(Arc::new(direct) as Arc<dyn UpstreamRpc>, EMBEDDED_URL);
    DappClient::new(wallet, Arc::new(relay) as Arc<dyn RelayApi>, direct, CONTRACT)
}

fn connected_wallet() -> MockInjectedWallet {
    let mut wallet = MockInjectedWallet::new();
    wallet
        .expect_request_accounts()
        .returning(|| Ok(vec![ACCOUNT]));
    wallet
        .expect_read_message()
        .withf(|contract| *contract == CONTRACT)
        .returning(|_| Ok("Hello, world".to_string()));
    wallet
}

#[tokio::test]
async fn connect_loads_account_and_message() {
    let mut dapp = client(Some(connected_wallet()), MockRelayApi::new(), MockUpstreamRpc::new());

    dapp.connect_wallet_and_load_message().await;

    let state = dapp.state();
    assert_eq!(state.user_address, Some(ACCOUNT));
    assert_eq!(state.current_message, "Hello, world");
    assert!(!state.update_success);
    assert!(state.notice.is_none());
}

#[tokio::test]
async fn connect_without_wallet_asks_to_install() {
    let mut dapp = client(None, MockRelayApi::new(), MockUpstreamRpc::new());

    dapp.connect_wallet_and_load_message().await;

    assert_eq!(dapp.state().notice.as_deref(), Some(INSTALL_WALLET_NOTICE));
    assert!(dapp.state().user_address.is_none());
}

#[tokio::test]
async fn connect_with_no_accounts_reports_it() {
    let mut wallet = MockInjectedWallet::new();
    wallet.expect_request_accounts().returning(|| Ok(vec![]));

    let mut dapp = client(Some(wallet), MockRelayApi::new(), MockUpstreamRpc::new());
    dapp.connect_wallet_and_load_message().await;

    assert_eq!(dapp.state().notice.as_deref(), Some(NO_ACCOUNTS_NOTICE));
    assert!(dapp.state().user_address.is_none());
}

#[tokio::test]
async fn update_message_success() {
    let mut wallet = connected_wallet();
    wallet
        .expect_set_message()
        .withf(|contract, message| *contract == CONTRACT && message == "gm")
        .times(1)
        .returning(|_, _| Ok(TxHash::ZERO));

    let mut dapp = client(Some(wallet), MockRelayApi::new(), MockUpstreamRpc::new());
    dapp.connect_wallet_and_load_message().await;
    dapp.set_new_message("gm");
    dapp.update_message().await;

    let state = dapp.state();
    assert_eq!(state.current_message, "gm");
    assert!(state.update_success);
    assert!(state.new_message.is_empty());
}

#[tokio::test]
async fn rejected_signature_keeps_current_message() {
    let mut wallet = connected_wallet();
    wallet
        .expect_set_message()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("user rejected transaction")));

    let mut dapp = client(Some(wallet), MockRelayApi::new(), MockUpstreamRpc::new());
    dapp.connect_wallet_and_load_message().await;
    dapp.set_new_message("gm");
    dapp.update_message().await;

    let state = dapp.state();
    assert_eq!(state.current_message, "Hello, world");
    assert!(!state.update_success);
    assert_eq!(state.new_message, "gm");
}

#[tokio::test]
async fn update_before_connect_asks_to_connect() {
    // No expectations: nothing may be signed
    let wallet = MockInjectedWallet::new();

    let mut dapp = client(Some(wallet), MockRelayApi::new(), MockUpstreamRpc::new());
    dapp.set_new_message("gm");
    dapp.update_message().await;

    assert_eq!(dapp.state().notice.as_deref(), Some(CONNECT_FIRST_NOTICE));
    assert!(dapp.state().current_message.is_empty());
}

#[tokio::test]
async fn wallet_balance_sets_address_and_ether_amount() {
    let mut wallet = MockInjectedWallet::new();
    wallet.expect_signer_address().returning(|| Ok(ACCOUNT));
    wallet
        .expect_balance()
        .withf(|address| *address == ACCOUNT)
        .returning(|_| Ok(U256::from(2_500_000_000_000_000_000u128)));

    let mut dapp = client(Some(wallet), MockRelayApi::new(), MockUpstreamRpc::new());
    dapp.fetch_balance_wallet().await;

    assert_eq!(dapp.state().user_address, Some(ACCOUNT));
    assert_eq!(dapp.state().balance_wallet.as_deref(), Some("2.5"));
}

#[tokio::test]
async fn direct_balance_requires_connected_address() {
    // No expectations: the embedded key must not be used
    let direct = MockUpstreamRpc::new();

    let mut dapp = client(Some(connected_wallet()), MockRelayApi::new(), direct);
    dapp.fetch_balance_direct().await;

    let state = dapp.state();
    assert_eq!(state.direct_error.as_deref(), Some(CONNECT_FOR_DIRECT_BALANCE));
    assert!(state.balance_direct.is_none());
    assert!(!state.rpc_url_visible);
    assert!(dapp.visible_rpc_url().is_none());
}

#[tokio::test]
async fn direct_balance_gate_leaves_other_state_untouched() {
    let mut direct = MockUpstreamRpc::new();
    direct
        .expect_balance()
        .withf(|address| *address == CONTRACT)
        .times(1)
        .returning(|_| Ok(one_ether()));

    let mut dapp = client(None, MockRelayApi::new(), direct);
    dapp.fetch_contract_balance().await;
    let before = dapp.state().clone();

    dapp.fetch_balance_direct().await;

    let mut expected = before;
    expected.direct_error = Some(CONNECT_FOR_DIRECT_BALANCE.to_string());
    assert_eq!(dapp.state(), &expected);
    assert_eq!(dapp.state().contract_balance.as_deref(), Some("1.0"));
}

#[tokio::test]
async fn direct_balance_reveals_embedded_url() {
    let mut direct = MockUpstreamRpc::new();
    direct
        .expect_balance()
        .withf(|address| *address == ACCOUNT)
        .times(1)
        .returning(|_| Ok(one_ether()));

    let mut dapp = client(Some(connected_wallet()), MockRelayApi::new(), direct);
    dapp.connect_wallet_and_load_message().await;
    dapp.fetch_balance_direct().await;

    assert_eq!(dapp.state().balance_direct.as_deref(), Some("1.0"));
    assert!(dapp.state().direct_error.is_none());
    assert_eq!(dapp.visible_rpc_url(), Some(EMBEDDED_URL));
}

#[tokio::test]
async fn direct_balance_failure_sets_error() {
    let mut direct = MockUpstreamRpc::new();
    direct
        .expect_balance()
        .returning(|_| Err(eyre::eyre!("429 Too Many Requests")));

    let mut dapp = client(Some(connected_wallet()), MockRelayApi::new(), direct);
    dapp.connect_wallet_and_load_message().await;
    dapp.fetch_balance_direct().await;

    let state = dapp.state();
    assert_eq!(state.direct_error.as_deref(), Some(DIRECT_BALANCE_FAILED));
    assert!(state.balance_direct.is_none());
    assert!(!state.rpc_url_visible);
}

#[tokio::test]
async fn contract_balance_uses_contract_address() {
    let mut direct = MockUpstreamRpc::new();
    direct
        .expect_balance()
        .withf(|address| *address == CONTRACT)
        .times(1)
        .returning(|_| Ok(U256::ZERO));

    let mut dapp = client(None, MockRelayApi::new(), direct);
    dapp.fetch_contract_balance().await;

    assert_eq!(dapp.state().contract_balance.as_deref(), Some("0.0"));
}

#[tokio::test]
async fn last_block_via_relay() {
    let mut relay = MockRelayApi::new();
    relay.expect_last_block().times(1).returning(|| Ok(8_000_001));

    let mut dapp = client(None, relay, MockUpstreamRpc::new());
    dapp.fetch_last_block_backend().await;

    assert_eq!(dapp.state().last_block, Some(8_000_001));
    assert!(dapp.state().backend_url_visible);
}

#[tokio::test]
async fn last_block_failure_keeps_previous_value() {
    let mut relay = MockRelayApi::new();
    let mut calls = 0;
    relay.expect_last_block().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(10)
        } else {
            Err(eyre::eyre!("500 Internal Server Error"))
        }
    });

    let mut dapp = client(None, relay, MockUpstreamRpc::new());
    dapp.fetch_last_block_backend().await;
    dapp.fetch_last_block_backend().await;

    assert_eq!(dapp.state().last_block, Some(10));
}

#[tokio::test]
async fn gas_price_via_relay() {
    let mut relay = MockRelayApi::new();
    relay
        .expect_gas_price()
        .times(1)
        .returning(|| Ok(Some("1000000000".to_string())));

    let mut dapp = client(None, relay, MockUpstreamRpc::new());
    dapp.fetch_gas_price().await;

    assert_eq!(dapp.state().gas_price.as_deref(), Some("1000000000"));
    assert!(dapp.state().gas_price_api_visible);
}

#[tokio::test]
async fn gas_price_absent_shows_not_available() {
    let mut relay = MockRelayApi::new();
    relay.expect_gas_price().returning(|| Ok(None));

    let mut dapp = client(None, relay, MockUpstreamRpc::new());
    dapp.fetch_gas_price().await;

    assert_eq!(dapp.state().gas_price.as_deref(), Some(GAS_PRICE_UNAVAILABLE));
}

#[tokio::test]
async fn gas_price_failure_hides_api_url() {
    let mut relay = MockRelayApi::new();
    relay
        .expect_gas_price()
        .returning(|| Err(eyre::eyre!("connection refused")));

    let mut dapp = client(None, relay, MockUpstreamRpc::new());
    dapp.fetch_gas_price().await;

    assert!(dapp.state().gas_price.is_none());
    assert!(!dapp.state().gas_price_api_visible);
}
