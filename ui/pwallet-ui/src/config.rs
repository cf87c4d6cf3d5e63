//! Wallet configuration.
//!
//! Read from `$PWALLET_CONFIG` or `~/.pwallet/config.toml`; a default file is
//! written on first start. The built-in chain registry is extended (or
//! overridden by name) with the `[[chains]]` entries.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pwallet_chain::address::parse_address;
use pwallet_chain::nft::{parse_token_id, DEFAULT_IPFS_GATEWAY};
use pwallet_chain::{Address, ChainError, ChainProfile, ChainRegistry, ClientOptions, TokenId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "PWALLET_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory found")]
    NoHomeDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown network '{name}' (known: {known})")]
    UnknownNetwork { name: String, known: String },

    #[error("invalid NFT contract address: {0}")]
    InvalidContract(String),

    #[error("invalid NFT token id: {0}")]
    InvalidTokenId(String),

    #[error("display_decimals must be at most 18, got {0}")]
    InvalidDecimals(u32),

    #[error("cannot set up chain client: {0}")]
    Chain(#[from] ChainError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active chain profile name
    #[serde(default = "default_network")]
    pub network: String,

    /// Fractional digits shown for balances
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,

    /// Unset means wait for receipts indefinitely.
    #[serde(default)]
    pub receipt_timeout_secs: Option<u64>,

    /// Environment variable holding the account's hex private key
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,

    /// Extra chain profiles; same-named entries replace the built-ins.
    #[serde(default)]
    pub chains: Vec<ChainProfile>,

    #[serde(default)]
    pub nft: NftConfig,
}

/// The one NFT shown on the NFT page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftConfig {
    #[serde(default = "default_nft_contract")]
    pub contract: String,
    #[serde(default = "default_nft_token_id")]
    pub token_id: String,
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,
}

fn default_network() -> String {
    "polygon".to_string()
}

fn default_display_decimals() -> u32 {
    2
}

fn default_poll_interval_ms() -> u64 {
    4_000
}

fn default_private_key_env() -> String {
    "PWALLET_PRIVATE_KEY".to_string()
}

fn default_nft_contract() -> String {
    // Uniswap V3 positions NFT
    "0xc36442b4a4522e871399cd717abdd847ab11fe88".to_string()
}

fn default_nft_token_id() -> String {
    "0".to_string()
}

fn default_ipfs_gateway() -> String {
    DEFAULT_IPFS_GATEWAY.to_string()
}

impl Default for NftConfig {
    fn default() -> Self {
        Self {
            contract: default_nft_contract(),
            token_id: default_nft_token_id(),
            ipfs_gateway: default_ipfs_gateway(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            display_decimals: default_display_decimals(),
            receipt_poll_interval_ms: default_poll_interval_ms(),
            receipt_timeout_secs: None,
            private_key_env: default_private_key_env(),
            chains: Vec::new(),
            nft: NftConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the standard location, creating a default file if missing.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!(path = %path.display(), "creating default config");
            let config = Self::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            network = %config.network,
            extra_chains = config.chains.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `$PWALLET_CONFIG`, else `~/.pwallet/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let mut path = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        path.push(".pwallet");
        path.push("config.toml");
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.active_chain()?;
        self.nft_contract()?;
        self.nft_token_id()?;
        if self.display_decimals > 18 {
            return Err(ConfigError::InvalidDecimals(self.display_decimals));
        }
        Ok(())
    }

    /// Built-in profiles plus the configured ones.
    pub fn registry(&self) -> ChainRegistry {
        let mut registry = ChainRegistry::builtin();
        for profile in &self.chains {
            registry.insert(profile.clone());
        }
        registry
    }

    pub fn active_chain(&self) -> Result<ChainProfile> {
        let registry = self.registry();
        registry
            .get(&self.network)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: self.network.clone(),
                known: registry.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn nft_contract(&self) -> Result<Address> {
        parse_address(&self.nft.contract)
            .map_err(|_| ConfigError::InvalidContract(self.nft.contract.clone()))
    }

    pub fn nft_token_id(&self) -> Result<TokenId> {
        parse_token_id(&self.nft.token_id)
            .map_err(|_| ConfigError::InvalidTokenId(self.nft.token_id.clone()))
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            poll_interval: Duration::from_millis(self.receipt_poll_interval_ms),
            receipt_timeout: self.receipt_timeout_secs.map(Duration::from_secs),
        }
    }
}
