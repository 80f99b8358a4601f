use crate::{
    error::ServiceError,
    models::{
        jsonrpc::{
            format_hex_u256, format_hex_u64, parse_balance_params, JsonRpcError,
            JsonRpcRequest, JsonRpcSuccess, RawParams, RelayedMethod,
        },
        relay::{BlockNumberResponse, GasPriceResponse, HealthResponse},
    },
    rpc::UpstreamRpc,
};
use actix_web::{
    error::{InternalError, JsonPayloadError},
    get,
    middleware::DefaultHeaders,
    post, web, HttpRequest, HttpResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Shared upstream handle as registered in the application data
pub type Upstream = web::Data<Arc<dyn UpstreamRpc>>;

/// Secure relay for the current block height.
///
/// The upstream credential stays on the server; callers only ever see the
/// block number or a generic failure.
#[get("/api/getLastBlock")]
async fn get_last_block(upstream: Upstream) -> Result<HttpResponse, ServiceError> {
    match upstream.block_number().await {
        Ok(block_number) => {
            debug!(block_number, "Relayed block number");
            Ok(HttpResponse::Ok().json(BlockNumberResponse { block_number }))
        }
        Err(e) => {
            let err = ServiceError::BlockNumber(format!("{e:#}"));
            error!(detail = err.detail(), "{}", err);
            Err(err)
        }
    }
}

/// Secure relay for the current gas price, in wei as a decimal string.
#[get("/api/getGasPrice")]
async fn get_gas_price(upstream: Upstream) -> Result<HttpResponse, ServiceError> {
    match upstream.gas_price().await {
        Ok(gas_price) => {
            debug!(?gas_price, "Relayed gas price");
            Ok(HttpResponse::Ok().json(GasPriceResponse::from_wei(gas_price)))
        }
        Err(e) => {
            let err = ServiceError::GasPrice(format!("{e:#}"));
            error!(detail = err.detail(), "{}", err);
            Err(err)
        }
    }
}

/// Service health check endpoint that verifies the upstream connection is working
#[get("/api/health")]
async fn health_check(upstream: Upstream) -> Result<HttpResponse, ServiceError> {
    info!("Health check requested");

    match upstream.block_number().await {
        Ok(latest_block) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            latest_block,
        })),
        Err(e) => {
            let err = ServiceError::UpstreamUnavailable(format!("{e:#}"));
            error!(detail = err.detail(), "Health check failed");
            Err(err)
        }
    }
}

/// JSON-RPC relay restricted to read-only methods
///
/// Accepts standard `eth_blockNumber`, `eth_gasPrice` and `eth_getBalance`
/// requests so existing Ethereum tooling can point at the relay instead of at
/// the keyed provider URL.
#[post("/rpc")]
async fn relay_jsonrpc(
    upstream: Upstream,
    request: web::Json<JsonRpcRequest<RawParams>>,
) -> HttpResponse {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return HttpResponse::BadRequest().json(JsonRpcError::invalid_params(
            request.id.clone(),
            "Invalid JSON-RPC version. Expected 2.0".to_string(),
        ));
    }

    let method = match request.method.parse::<RelayedMethod>() {
        Ok(method) => method,
        Err(msg) => {
            debug!(method = %request.method, "Rejected JSON-RPC method");
            return HttpResponse::BadRequest()
                .json(JsonRpcError::invalid_params(request.id.clone(), msg));
        }
    };

    let outcome = match method {
        RelayedMethod::BlockNumber => upstream
            .block_number()
            .await
            .map(|n| serde_json::Value::String(format_hex_u64(n))),
        RelayedMethod::GasPrice => upstream.gas_price().await.map(|price| match price {
            Some(wei) => serde_json::Value::String(format!("0x{wei:x}")),
            None => serde_json::Value::Null,
        }),
        RelayedMethod::GetBalance => {
            let address = match parse_balance_params(&request.params) {
                Ok(address) => address,
                Err(msg) => {
                    return HttpResponse::BadRequest()
                        .json(JsonRpcError::invalid_params(request.id.clone(), msg));
                }
            };
            upstream
                .balance(address)
                .await
                .map(|wei| serde_json::Value::String(format_hex_u256(wei)))
        }
    };

    match outcome {
        Ok(result) => HttpResponse::Ok().json(JsonRpcSuccess::new(request.id.clone(), result)),
        Err(e) => {
            error!(method = %request.method, "JSON-RPC relay failed: {:#}", e);
            HttpResponse::InternalServerError().json(JsonRpcError::internal_error(
                request.id.clone(),
                "Upstream request failed".to_string(),
            ))
        }
    }
}

/// Answer an undecodable `/rpc` body with a JSON-RPC error instead of plain text
fn jsonrpc_body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected JSON-RPC body: {}", err);
    let response = HttpResponse::BadRequest().json(JsonRpcError::invalid_params(
        serde_json::Value::Null,
        format!("Invalid request body: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// Permissive CORS: browsers on any origin may call the relay
pub fn cors() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(jsonrpc_body_error))
       .service(get_last_block)
       .service(get_gas_price)
       .service(health_check)
       .service(relay_jsonrpc);
}
