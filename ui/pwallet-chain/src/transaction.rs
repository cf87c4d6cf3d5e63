//! Legacy (type 0) transfers with EIP-155 replay protection.

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};

use crate::error::Result;
use crate::keys::PrivateKey;

/// Everything that goes into a plain value transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
}

/// Signed, encoded transaction ready for `eth_sendRawTransaction`.
#[derive(Clone, Debug)]
pub struct SignedTransfer {
    pub raw: Bytes,
    pub hash: TxHash,
}

impl Transfer {
    pub fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: Bytes::new(),
        }
    }

    /// Sign with `key`; `v` carries the chain id.
    pub fn sign(&self, key: &PrivateKey) -> Result<SignedTransfer> {
        let tx = self.to_legacy();
        let signature = key.sign_hash(&tx.signature_hash())?;
        let envelope = TxEnvelope::from(tx.into_signed(signature));
        Ok(SignedTransfer {
            raw: envelope.encoded_2718().into(),
            hash: *envelope.tx_hash(),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{hex, keccak256};

    use super::*;

    // Example transaction from EIP-155.
    fn eip155_example() -> Transfer {
        Transfer {
            chain_id: 1,
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: Address::repeat_byte(0x35),
            value: U256::from(1_000_000_000_000_000_000u128),
        }
    }

    fn eip155_key() -> PrivateKey {
        PrivateKey::from_bytes(&[0x46; 32]).unwrap()
    }

    #[test]
    fn test_signing_hash() {
        assert_eq!(
            hex::encode(eip155_example().to_legacy().signature_hash()),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn test_signed_encoding() {
        let signed = eip155_example().sign(&eip155_key()).unwrap();
        assert_eq!(
            hex::encode(&signed.raw),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
        assert_eq!(signed.hash, keccak256(&signed.raw));
    }

    #[test]
    fn test_signature_recovers_sender() {
        let tx = eip155_example().to_legacy();
        let key = eip155_key();
        let signature = key.sign_hash(&tx.signature_hash()).unwrap();
        assert_eq!(
            signature
                .recover_address_from_prehash(&tx.signature_hash())
                .unwrap(),
            key.address()
        );
    }
}
