use actix_web::{web, App, HttpServer};
use hello_dapp::{
    api,
    config::RelayConfig,
    logging,
    rpc::{EthereumClient, UpstreamRpc},
};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Relay entry point
///
/// Sets up logging, loads configuration, builds the one upstream client of the
/// process and serves the relay endpoints with it.
#[actix_web::main] // Actix will build a multithreaded runtime
async fn main() -> std::io::Result<()> {
    logging::init();

    // Load configuration from environment variables
    let config = RelayConfig::from_env().expect("Failed to load config");

    // One upstream client for the lifetime of the process
    let eth_client = EthereumClient::new(&config.upstream_rpc_url)
        .expect("Invalid upstream RPC URL");
    eth_client.check_connection().await;
    let upstream: Arc<dyn UpstreamRpc> = Arc::new(eth_client);

    info!(host = %config.host, port = config.port, "Backend API listening");

    // Create and start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Browsers on any origin may call the relay
            .wrap(api::cors())
            // Register the upstream client as application data (shared between requests)
            .app_data(web::Data::new(upstream.clone()))
            // Configure API routes
            .configure(api::configure)
    })
    // Set number of worker threads
    .workers(4)
    // Bind to host/port from configuration
    .bind((config.host.as_str(), config.port))?
    // Start the server
    .run()
    .await
}
