//! Error type shared by every chain operation.

use alloy::transports::TransportError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ChainError {
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),

    #[error("no contract deployed at {0}")]
    NoContract(String),

    #[error("timeout waiting for {0}")]
    Timeout(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

impl ChainError {
    /// Human readable reason, when the fault carries one.
    ///
    /// Node rejections ("insufficient funds for gas * price + value") and
    /// local validation failures have a reason; transport and decoding
    /// faults do not.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Rpc { message, .. } => Some(message.clone()),
            Self::InvalidAddress(_)
            | Self::InvalidPrivateKey
            | Self::InvalidAmount(_)
            | Self::Signing(_)
            | Self::InvalidUrl(_)
            | Self::NoContract(_) => Some(self.to_string()),
            Self::Http(_) | Self::Decode(_) | Self::Timeout(_) => None,
        }
    }

    /// JSON rendering of the whole error, for display when there is no reason.
    pub fn serialized(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }

    /// Whether the node reported that the call reverted.
    pub fn is_revert(&self) -> bool {
        match self {
            // 3 is the geth code for "execution reverted" with data
            Self::Rpc { code, message } => *code == 3 || message.contains("revert"),
            _ => false,
        }
    }
}

impl From<TransportError> for ChainError {
    fn from(e: TransportError) -> Self {
        if let Some(payload) = e.as_error_resp() {
            return ChainError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            };
        }
        if e.is_ser_error() || e.is_deser_error() {
            return ChainError::Decode(e.to_string());
        }
        ChainError::Http(e.to_string())
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        ChainError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(e: serde_json::Error) -> Self {
        ChainError::Decode(e.to_string())
    }
}
