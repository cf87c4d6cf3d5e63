//! Shared reactive state for the wallet UI.

use std::sync::Arc;

use pwallet_chain::{
    Address, ChainClient, ChainError, ChainProfile, ChainRegistry, ContractClient, Erc721Client,
    RpcChainClient, TokenId,
};

use crate::account::Account;
use crate::config::{AppConfig, ConfigError};
use crate::form::TransferForm;
use crate::transfer::TransferOutcome;

/// Whether the RPC endpoint serves the configured chain.
#[derive(Clone, Debug, PartialEq)]
pub enum ChainStatus {
    Checking,
    Connected(u64),
    WrongChain { expected: u64, actual: u64 },
    Error(String),
}

impl ChainStatus {
    pub fn from_reported(expected: u64, reported: Result<u64, ChainError>) -> Self {
        match reported {
            Ok(actual) if actual == expected => ChainStatus::Connected(actual),
            Ok(actual) => ChainStatus::WrongChain { expected, actual },
            Err(e) => ChainStatus::Error(e.to_string()),
        }
    }
}

/// A transfer submitted during this session.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferRecord {
    /// sending account
    pub from: Address,
    pub destination: String,
    pub amount: f64,
    pub outcome: TransferOutcome,
}

impl TransferRecord {
    pub fn new(from: Address, form: &TransferForm, outcome: TransferOutcome) -> Self {
        Self {
            from,
            destination: form.destination.clone(),
            amount: form.amount,
            outcome,
        }
    }

    pub fn tx_hash(&self) -> Option<String> {
        self.outcome
            .receipt()
            .map(|receipt| receipt.transaction_hash.to_string())
    }

    pub fn label(&self) -> &'static str {
        match self.outcome {
            TransferOutcome::Confirmed(_) => "Confirmed",
            TransferOutcome::Failed(_) => "Failed",
            TransferOutcome::Errored(_) => "Error",
        }
    }
}

/// The NFT shown on the NFT page.
#[derive(Clone, Debug, PartialEq)]
pub struct NftTarget {
    pub contract: Address,
    pub token_id: TokenId,
}

/// Top-level reactive state, stored in a Dioxus `Signal`.
#[derive(Clone, Debug)]
pub struct WalletState {
    pub chain: ChainProfile,
    /// every known network, for naming chain ids
    pub registry: ChainRegistry,
    pub chain_status: ChainStatus,
    pub account: Option<Account>,
    pub display_decimals: u32,
    pub nft: NftTarget,
    /// newest last
    pub history: Vec<TransferRecord>,
}

impl WalletState {
    /// Transfers sent from `address`, newest first.
    pub fn history_for(&self, address: &Address) -> Vec<TransferRecord> {
        self.history
            .iter()
            .rev()
            .filter(|record| record.from == *address)
            .cloned()
            .collect()
    }

    /// Name of the known network with `chain_id`, or the bare id.
    pub fn network_label(&self, chain_id: u64) -> String {
        match self.registry.by_chain_id(chain_id) {
            Some(profile) => format!("{} ({chain_id})", profile.name),
            None => chain_id.to_string(),
        }
    }
}

/// Balance and transfer calls.
pub type SharedChainClient = Arc<dyn ChainClient>;

/// NFT metadata lookups.
pub type SharedContractClient = Arc<dyn ContractClient>;

/// Everything the UI needs at launch, built once from the config.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    /// built-in profiles plus the configured ones
    pub registry: ChainRegistry,
    pub chain: ChainProfile,
    pub nft: NftTarget,
    pub account: Option<Account>,
    pub chain_client: SharedChainClient,
    pub contract_client: SharedContractClient,
}

impl AppContext {
    pub fn from_config(config: AppConfig, account: Option<Account>) -> Result<Self, ConfigError> {
        let registry = config.registry();
        let chain = config.active_chain()?;
        let nft = NftTarget {
            contract: config.nft_contract()?,
            token_id: config.nft_token_id()?,
        };
        let chain_client: SharedChainClient =
            Arc::new(RpcChainClient::new(&chain, config.client_options())?);
        let contract_client: SharedContractClient = Arc::new(Erc721Client::new(
            &chain.rpc_url,
            &config.nft.ipfs_gateway,
        )?);

        Ok(Self {
            config,
            registry,
            chain,
            nft,
            account,
            chain_client,
            contract_client,
        })
    }

    pub fn initial_state(&self) -> WalletState {
        WalletState {
            chain: self.chain.clone(),
            registry: self.registry.clone(),
            chain_status: ChainStatus::Checking,
            account: self.account.clone(),
            display_decimals: self.config.display_decimals,
            nft: self.nft.clone(),
            history: Vec::new(),
        }
    }
}
