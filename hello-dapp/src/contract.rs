//! HelloWorld contract surface and its deployment record.

use alloy::{primitives::Address, sol};
use serde::{Deserialize, Serialize, Serializer};
use std::{fs, io, path::Path};

sol! {
    /// Minimal interface of the deployed HelloWorld contract.
    #[sol(rpc)]
    interface IHelloWorld {
        /// Emitted by `setMessage`.
        #[derive(Debug)]
        event MessageUpdated(string newMessage);

        function message() external view returns (string);

        function setMessage(string _newMessage) external;
    }
}

/// `{ "address": "0x..." }` as written by the deploy tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddressFile {
    #[serde(serialize_with = "checksummed")]
    pub address: Address,
}

fn checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

impl ContractAddressFile {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Read a deployment record
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(io::Error::from)
    }

    /// Write the record, replacing any previous content
    ///
    /// Missing parent directories are created. Output is indented by two spaces.
    pub fn store(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, body)
    }
}
