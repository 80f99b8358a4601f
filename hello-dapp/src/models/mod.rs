//! Data models used throughout the application
//!
//! This module contains the wire shapes of the relay endpoints, the JSON-RPC
//! envelope used by the `/rpc` endpoint, and small unit helpers.

// JSON-RPC protocol data structures
pub mod jsonrpc;

// Bodies of the REST relay endpoints
pub mod relay;

// Wei / ether formatting
pub mod units;
