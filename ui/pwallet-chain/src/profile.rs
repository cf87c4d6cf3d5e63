//! Known chain profiles and the registry the app selects from.

use serde::{Deserialize, Serialize};

use alloy::primitives::Address;

/// One network the wallet can talk to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    /// profile name used in config ("polygon")
    pub name: String,
    pub chain_id: u64,
    /// JSON-RPC HTTP endpoint
    pub rpc_url: String,
    /// explorer base URL without trailing slash
    pub block_explorer_url: String,
    /// native currency symbol
    pub currency_symbol: String,
}

impl ChainProfile {
    /// ethereum mainnet
    pub fn mainnet() -> Self {
        Self {
            name: "mainnet".into(),
            chain_id: 1,
            rpc_url: "https://ethereum-rpc.publicnode.com".into(),
            block_explorer_url: "https://etherscan.io".into(),
            currency_symbol: "ETH".into(),
        }
    }

    /// goerli testnet
    pub fn goerli() -> Self {
        Self {
            name: "goerli".into(),
            chain_id: 5,
            rpc_url: "https://ethereum-goerli-rpc.publicnode.com".into(),
            block_explorer_url: "https://goerli.etherscan.io".into(),
            currency_symbol: "ETH".into(),
        }
    }

    /// polygon PoS mainnet
    pub fn polygon() -> Self {
        Self {
            name: "polygon".into(),
            chain_id: 137,
            rpc_url: "https://polygon-rpc.com".into(),
            block_explorer_url: "https://polygonscan.com".into(),
            currency_symbol: "MATIC".into(),
        }
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base(), tx_hash)
    }

    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_base(), address)
    }

    fn explorer_base(&self) -> &str {
        self.block_explorer_url.trim_end_matches('/')
    }
}

/// Ordered set of profiles, looked up by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRegistry {
    profiles: Vec<ChainProfile>,
}

impl ChainRegistry {
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                ChainProfile::mainnet(),
                ChainProfile::goerli(),
                ChainProfile::polygon(),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ChainProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Add a profile, replacing any existing one with the same name.
    pub fn insert(&mut self, profile: ChainProfile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// The profile serving `chain_id`, if any.
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&ChainProfile> {
        self.profiles.iter().find(|p| p.chain_id == chain_id)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainProfile> {
        self.profiles.iter()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
