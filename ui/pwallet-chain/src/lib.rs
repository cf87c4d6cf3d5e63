//! EVM chain access for the pwallet UI.
//!
//! Everything the UI needs from the network lives here: chain profiles,
//! unit conversion, keys, legacy EIP-155 transfer signing and ERC-721
//! metadata lookup, all on top of `alloy`. The UI only talks to the
//! [`ChainClient`] and [`ContractClient`] traits so it can be driven by
//! mocks in tests.

pub mod address;
pub mod client;
pub mod error;
pub mod keys;
pub mod nft;
pub mod profile;
pub mod receipt;
pub mod transaction;
pub mod units;

pub use alloy::primitives::{Address, TxHash, U256};

pub use client::{ChainClient, ClientOptions, RpcChainClient};
pub use error::{ChainError, Result};
pub use keys::PrivateKey;
pub use nft::{
    Attribute, ContractClient, ContractHandle, Erc721Client, MediaKind, NftMetadata, TokenId,
};
pub use profile::{ChainProfile, ChainRegistry};
pub use receipt::TransactionReceipt;
