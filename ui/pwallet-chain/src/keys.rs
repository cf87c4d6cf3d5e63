//! secp256k1 account keys.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, Signature, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signer, SignerSync};

use crate::error::ChainError;

/// Account private key. Never printed.
#[derive(Clone)]
pub struct PrivateKey {
    signer: PrivateKeySigner,
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, ChainError> {
        let signer = PrivateKeySigner::from_bytes(&B256::from(*bytes))
            .map_err(|_| ChainError::InvalidPrivateKey)?;
        Ok(Self { signer })
    }

    /// Address controlled by this key.
    pub fn address(&self) -> Address {
        Signer::address(&self.signer)
    }

    /// Sign a 32-byte prehash. `s` is low-normalized.
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature, ChainError> {
        self.signer
            .sign_hash_sync(hash)
            .map_err(|e| ChainError::Signing(e.to_string()))
    }
}

impl FromStr for PrivateKey {
    type Err = ChainError;

    /// Hex with or without `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let signer = digits
            .parse::<PrivateKeySigner>()
            .map_err(|_| ChainError::InvalidPrivateKey)?;
        Ok(Self { signer })
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, <redacted>)", self.address())
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::keccak256;

    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn derives_known_address() {
        let key: PrivateKey = KEY.parse().unwrap();
        assert_eq!(
            key.address().to_string(),
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
        );
    }

    #[test]
    fn accepts_hex_without_prefix() {
        let with: PrivateKey = KEY.parse().unwrap();
        let without: PrivateKey = KEY.trim_start_matches("0x").parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("0x1234".parse::<PrivateKey>().is_err());
        assert!("not a key".parse::<PrivateKey>().is_err());
        // zero is not a valid scalar
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let key: PrivateKey = KEY.parse().unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("4c0883a6"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn signatures_recover_to_the_signer() {
        let key: PrivateKey = KEY.parse().unwrap();
        let hash = keccak256(b"pwallet");
        let signature = key.sign_hash(&hash).unwrap();
        assert_eq!(
            signature.recover_address_from_prehash(&hash).unwrap(),
            key.address()
        );
    }
}
