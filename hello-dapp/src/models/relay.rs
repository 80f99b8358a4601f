use serde::{Deserialize, Serialize};

/// Body of a successful `GET /api/getLastBlock`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumberResponse {
    pub block_number: u64,
}

/// Body of a successful `GET /api/getGasPrice`
///
/// The price is carried as a decimal string in wei so that large values survive
/// JSON number precision limits on the consumer side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    pub gas_price: Option<String>,
}

impl GasPriceResponse {
    pub fn from_wei(gas_price: Option<u128>) -> Self {
        Self {
            gas_price: gas_price.map(|wei| wei.to_string()),
        }
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub latest_block: u64,
}

/// Generic error body shared by every relay endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
