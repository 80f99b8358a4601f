// Export modules for testing and binaries
pub mod api;
pub mod client;
pub mod config;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod models;
pub mod rpc;
