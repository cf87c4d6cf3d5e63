//! The account the wallet operates on.

use pwallet_chain::{Address, ChainError, PrivateKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("environment variable {0} is not set")]
    MissingKey(String),

    #[error("environment variable {var} does not hold a valid key: {source}")]
    InvalidKey {
        var: String,
        #[source]
        source: ChainError,
    },
}

/// Address, last known balance and signing key. Debug output hides the key.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub address: Address,
    /// display-unit balance known before the first refresh
    pub balance: String,
    pub private_key: PrivateKey,
}

impl Account {
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        Self {
            address: private_key.address(),
            balance: "0".to_string(),
            private_key,
        }
    }

    /// Read a hex key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, AccountError> {
        let raw = std::env::var(var).map_err(|_| AccountError::MissingKey(var.to_string()))?;
        let key = raw.parse().map_err(|source| AccountError::InvalidKey {
            var: var.to_string(),
            source,
        })?;
        Ok(Self::from_private_key(key))
    }
}
