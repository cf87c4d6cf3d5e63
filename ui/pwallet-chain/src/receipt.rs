//! The parts of a transaction receipt the wallet keeps.

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, BlockHash, TxHash};
use serde::{Deserialize, Serialize};

/// Receipt status flag for a successful execution.
pub const STATUS_SUCCESS: u64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_hash: Option<BlockHash>,
    #[serde(default, with = "alloy::serde::quantity::opt")]
    pub block_number: Option<u64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(with = "alloy::serde::quantity")]
    pub gas_used: u64,
    #[serde(with = "alloy::serde::quantity")]
    pub effective_gas_price: u128,
    #[serde(with = "alloy::serde::quantity")]
    pub status: u64,
}

impl TransactionReceipt {
    /// Keep the summary fields of a node receipt.
    pub fn from_response<R: ReceiptResponse>(receipt: &R) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash(),
            block_hash: receipt.block_hash(),
            block_number: receipt.block_number(),
            from: receipt.from(),
            to: receipt.to(),
            gas_used: receipt.gas_used(),
            effective_gas_price: receipt.effective_gas_price(),
            status: receipt.status() as u64,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// JSON rendering with the node's field names.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
