use crate::error::ConfigError;
use std::path::PathBuf;

/// Names under which the upstream provider URL has been published.
///
/// Checked in order; the first one set wins.
pub const UPSTREAM_URL_VARS: [&str; 4] = [
    "ALCHEMY_URL",
    "ALCHEMY_SEPOLIA_URL",
    "VITE_ALCHEMY_SEPOLIA_URL",
    "ALCHEMY_SEPOLIA_RPC_URL",
];

/// RPC endpoint used by the deploy tool
pub const DEPLOY_RPC_URL_VAR: &str = "ALCHEMY_SEPOLIA_RPC_URL";

/// Hex private key of the deploying account
pub const DEPLOYER_KEY_VAR: &str = "WALLET_DEPLOYER_SEPOLIA_PRIVATE_KEY";

/// Upstream URL embedded into the client; deliberately exposed to the user
pub const CLIENT_RPC_URL_VAR: &str = "VITE_ALCHEMY_SEPOLIA_URL";

/// Load a `.env` file if one exists and snapshot the process environment
///
/// The `config` crate lowercases environment keys, so lookups below use the
/// lowercase form of the variable names.
pub fn environment() -> Result<::config::Config, ConfigError> {
    // Load .env file if it exists (useful for development)
    let _ = dotenv::dotenv();

    Ok(::config::Config::builder()
        .add_source(::config::Environment::default())
        .build()?)
}

fn optional(source: &::config::Config, name: &str) -> Option<String> {
    source
        .get_string(&name.to_lowercase())
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn required(source: &::config::Config, name: &str, missing: &mut Vec<String>) -> String {
    optional(source, name).unwrap_or_else(|| {
        missing.push(name.to_string());
        String::new()
    })
}

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 3001)
    pub port: u16,

    /// Keyed upstream provider URL; never sent to clients
    pub upstream_rpc_url: String,
}

impl RelayConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "127.0.0.1")
    /// * `PORT` - Server port (default: 3001)
    /// * one of [`UPSTREAM_URL_VARS`] - upstream provider URL (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&environment()?)
    }

    pub fn from_source(source: &::config::Config) -> Result<Self, ConfigError> {
        let upstream_rpc_url = UPSTREAM_URL_VARS
            .iter()
            .find_map(|name| optional(source, name))
            .ok_or_else(|| {
                ConfigError::MissingVars(vec![UPSTREAM_URL_VARS.join(" or ")])
            })?;

        let port = match optional(source, "PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: e.to_string(),
            })?,
            None => 3001,
        };

        Ok(Self {
            host: optional(source, "HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            upstream_rpc_url,
        })
    }
}

/// Deploy tool configuration
#[derive(Clone)]
pub struct DeployConfig {
    pub rpc_url: String,

    /// Never printed; see the `Debug` impl
    pub private_key: String,

    /// Compiled HelloWorld artifact (Hardhat JSON)
    pub artifact_path: PathBuf,

    /// Deployment record kept next to the contracts
    pub deployments_path: PathBuf,

    /// Copy consumed by the client at start-up
    pub frontend_path: PathBuf,
}

impl DeployConfig {
    /// Load and validate the deploy environment
    ///
    /// Every missing required variable is reported, not just the first one.
    ///
    /// # Environment Variables
    ///
    /// * `ALCHEMY_SEPOLIA_RPC_URL` - RPC endpoint (required)
    /// * `WALLET_DEPLOYER_SEPOLIA_PRIVATE_KEY` - deployer key (required)
    /// * `HELLO_ARTIFACT_PATH` - default "artifacts/contracts/HelloWorld.sol/HelloWorld.json"
    /// * `DEPLOYMENTS_PATH` - default "deployments/localhost.json"
    /// * `FRONTEND_ADDRESS_PATH` - default "apps/frontend/src/contract-address.json"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&environment()?)
    }

    pub fn from_source(source: &::config::Config) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let rpc_url = required(source, DEPLOY_RPC_URL_VAR, &mut missing);
        let private_key = required(source, DEPLOYER_KEY_VAR, &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let path = |name: &str, default: &str| {
            PathBuf::from(optional(source, name).unwrap_or_else(|| default.to_string()))
        };

        Ok(Self {
            rpc_url,
            private_key,
            artifact_path: path(
                "HELLO_ARTIFACT_PATH",
                "artifacts/contracts/HelloWorld.sol/HelloWorld.json",
            ),
            deployments_path: path("DEPLOYMENTS_PATH", "deployments/localhost.json"),
            frontend_path: path(
                "FRONTEND_ADDRESS_PATH",
                "apps/frontend/src/contract-address.json",
            ),
        })
    }
}

impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("artifact_path", &self.artifact_path)
            .field("deployments_path", &self.deployments_path)
            .field("frontend_path", &self.frontend_path)
            .finish()
    }
}

/// dApp client configuration
///
/// Not `Debug`: it may hold a wallet key.
#[derive(Clone)]
pub struct ClientConfig {
    /// Embedded upstream URL for the insecure direct path
    pub direct_rpc_url: String,

    /// Base URL of the relay
    pub backend_url: String,

    /// Address file written by the deploy tool
    pub contract_address_path: PathBuf,

    /// Signing key for the local wallet; `None` behaves like a browser
    /// without a wallet extension
    pub wallet_private_key: Option<String>,

    /// Node the wallet talks to (default: the direct URL)
    pub wallet_rpc_url: String,
}

impl ClientConfig {
    /// # Environment Variables
    ///
    /// * `VITE_ALCHEMY_SEPOLIA_URL` - embedded upstream URL (required)
    /// * `VITE_BACKEND_URL` - relay base URL (default: "http://localhost:3001")
    /// * `CONTRACT_ADDRESS_PATH` - default "apps/frontend/src/contract-address.json"
    /// * `WALLET_PRIVATE_KEY` - optional local wallet key
    /// * `WALLET_RPC_URL` - optional wallet node URL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&environment()?)
    }

    pub fn from_source(source: &::config::Config) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let direct_rpc_url = required(source, CLIENT_RPC_URL_VAR, &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Self {
            backend_url: optional(source, "VITE_BACKEND_URL")
                .unwrap_or_else(|| "http://localhost:3001".to_string()),
            contract_address_path: PathBuf::from(
                optional(source, "CONTRACT_ADDRESS_PATH")
                    .unwrap_or_else(|| "apps/frontend/src/contract-address.json".to_string()),
            ),
            wallet_private_key: optional(source, "WALLET_PRIVATE_KEY"),
            wallet_rpc_url: optional(source, "WALLET_RPC_URL")
                .unwrap_or_else(|| direct_rpc_url.clone()),
            direct_rpc_url,
        })
    }
}
