use std::str::FromStr;
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Methods answered by the `/rpc` relay endpoint
///
/// Only read-only queries are relayed; anything able to move funds or reveal
/// node internals is rejected before reaching the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayedMethod {
    BlockNumber,
    GasPrice,
    GetBalance,
}

impl FromStr for RelayedMethod {
    type Err = String;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method {
            "eth_blockNumber" => Ok(Self::BlockNumber),
            "eth_gasPrice" => Ok(Self::GasPrice),
            "eth_getBalance" => Ok(Self::GetBalance),
            other => Err(format!("Unsupported method: {}", other)),
        }
    }
}

/// JSON-RPC 2.0 request structure
///
/// This structure represents a standard JSON-RPC request with generic parameters.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// JSON-RPC protocol version (should be "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters, empty when omitted
    #[serde(default)]
    pub params: T,

    /// Request identifier
    pub id: serde_json::Value,
}

/// Positional parameters as sent by standard Ethereum clients
pub type RawParams = Vec<serde_json::Value>;

/// JSON-RPC 2.0 successful response
#[derive(Debug, Serialize)]
pub struct JsonRpcSuccess<T> {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    pub id: serde_json::Value,

    /// Method result
    pub result: T,
}

/// JSON-RPC 2.0 error response
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    pub id: serde_json::Value,

    /// Error details
    pub error: JsonRpcErrorDetail,
}

/// JSON-RPC 2.0 error detail
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorDetail {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Invalid parameters error (-32602)
    pub fn invalid_params(id: serde_json::Value, message: String) -> Self {
        Self::with_code(id, -32602, message)
    }

    /// Internal error (-32603)
    pub fn internal_error(id: serde_json::Value, message: String) -> Self {
        Self::with_code(id, -32603, message)
    }

    fn with_code(id: serde_json::Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: JsonRpcErrorDetail {
                code,
                message,
                data: None,
            },
        }
    }
}

impl<T> JsonRpcSuccess<T> {
    pub fn new(id: serde_json::Value, result: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

/// Extract the account of an `eth_getBalance` call.
///
/// The block tag is optional and only `"latest"` is accepted, as the relay
/// never queries historical state.
pub fn parse_balance_params(params: &[serde_json::Value]) -> Result<Address, String> {
    let address = params
        .first()
        .and_then(|value| value.as_str())
        .ok_or_else(|| "Missing account address".to_string())?;
    let address = parse_hex_address(address)?;

    match params.get(1) {
        None => {}
        Some(tag) if tag.as_str() == Some("latest") => {}
        Some(tag) => return Err(format!("Unsupported block tag: {}", tag)),
    }

    if params.len() > 2 {
        return Err("Too many parameters".to_string());
    }

    Ok(address)
}

/// Parse a hexadecimal address string into an `Address`.
///
/// Expects a string starting with "0x" and 40 hex digits (20 bytes).
pub fn parse_hex_address(hex: &str) -> Result<Address, String> {
    if !hex.starts_with("0x") {
        return Err("Address must start with 0x".to_string());
    }
    Address::from_str(hex)
        .map_err(|e| format!("Invalid address: {}", e))
}

/// Format a `U256` value into a hexadecimal quantity prefixed with "0x".
pub fn format_hex_u256(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Format a `u64` value into a hexadecimal quantity prefixed with "0x".
pub fn format_hex_u64(value: u64) -> String {
    format!("0x{:x}", value)
}
