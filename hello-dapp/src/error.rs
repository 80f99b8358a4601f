use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::relay::ErrorResponse;

/// Relay error types
///
/// Every variant collapses its cause into one fixed, caller-facing message.
/// The carried detail is for the server log only and never leaves the process.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Upstream block-number query failed
    #[error("Error fetching block number")]
    BlockNumber(String),

    /// Upstream gas-price query failed
    #[error("Error fetching gas price")]
    GasPrice(String),

    /// Upstream unreachable during a health check
    #[error("Upstream RPC unavailable")]
    UpstreamUnavailable(String),
}

impl ServiceError {
    /// Internal detail kept for logging
    pub fn detail(&self) -> &str {
        match self {
            ServiceError::BlockNumber(detail)
            | ServiceError::GasPrice(detail)
            | ServiceError::UpstreamUnavailable(detail) => detail,
        }
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::BlockNumber(_) | ServiceError::GasPrice(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Errors raised while assembling process configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more required variables are unset
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    MissingVars(Vec<String>),

    /// A variable is set but cannot be used
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// The configuration source itself failed
    #[error(transparent)]
    Source(#[from] ::config::ConfigError),
}

/// Errors aborting a contract deployment
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Failed to read contract artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed contract artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact carries no creation code (interface or abstract contract)
    #[error("Contract artifact {0} has empty bytecode")]
    EmptyBytecode(PathBuf),

    #[error("Invalid deployer private key: {0}")]
    InvalidKey(String),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Deployment transaction failed: {0}")]
    Transaction(String),

    #[error("Deployment receipt carries no contract address")]
    MissingContractAddress,

    #[error("Failed to write deployment output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
