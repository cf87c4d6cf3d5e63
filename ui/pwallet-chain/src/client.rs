//! Balance queries and native token transfers.

use std::future::Future;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::time::Instant;

use crate::address::parse_address;
use crate::error::{ChainError, Result};
use crate::keys::PrivateKey;
use crate::profile::ChainProfile;
use crate::receipt::TransactionReceipt;
use crate::transaction::Transfer;
use crate::units::ether_from_f64;

/// What the wallet UI needs from a chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id reported by the node.
    async fn chain_id(&self) -> Result<u64>;

    /// Balance in wei.
    async fn get_balance(&self, address: &Address) -> Result<U256>;

    /// Send `amount` (display unit) from `from` to the raw `to` string and
    /// wait until the transaction is mined.
    ///
    /// A mined but reverted transfer is still `Ok`; check
    /// [`TransactionReceipt::is_success`].
    async fn send_token(
        &self,
        amount: f64,
        from: &Address,
        to: &str,
        private_key: &PrivateKey,
    ) -> Result<TransactionReceipt>;
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// delay between receipt polls
    pub poll_interval: Duration,
    /// give up waiting for a receipt after this long; `None` waits forever
    pub receipt_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(4),
            receipt_timeout: None,
        }
    }
}

/// HTTP provider for `rpc_url`.
pub(crate) fn connect_http(rpc_url: &str) -> Result<DynProvider> {
    let url = rpc_url
        .parse()
        .map_err(|_| ChainError::InvalidUrl(rpc_url.to_string()))?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

/// [`ChainClient`] backed by a node's JSON-RPC endpoint. Transactions are
/// signed locally.
pub struct RpcChainClient {
    provider: DynProvider,
    chain_id: u64,
    options: ClientOptions,
}

impl RpcChainClient {
    pub fn new(profile: &ChainProfile, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            provider: connect_http(&profile.rpc_url)?,
            chain_id: profile.chain_id,
            options,
        })
    }

    async fn fetch_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;
        Ok(receipt.as_ref().map(TransactionReceipt::from_response))
    }
}

/// Poll `fetch` until it yields a receipt.
///
/// The transaction is already broadcast, so transport and decoding failures
/// are logged and polled through. A node error response ends the wait, as
/// does `receipt_timeout`.
async fn poll_receipt<F, Fut>(
    options: &ClientOptions,
    hash: TxHash,
    mut fetch: F,
) -> Result<TransactionReceipt>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<TransactionReceipt>>>,
{
    let started = Instant::now();
    loop {
        match fetch().await {
            Ok(Some(receipt)) => return Ok(receipt),
            Ok(None) => {}
            Err(e @ ChainError::Rpc { .. }) => return Err(e),
            Err(e) => tracing::warn!(%hash, error = %e, "receipt poll failed, retrying"),
        }
        if let Some(limit) = options.receipt_timeout {
            if started.elapsed() >= limit {
                return Err(ChainError::Timeout(format!("receipt of {hash}")));
            }
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn get_balance(&self, address: &Address) -> Result<U256> {
        let wei = self.provider.get_balance(*address).await?;
        tracing::debug!(%address, balance = %format_ether(wei), "fetched balance");
        Ok(wei)
    }

    async fn send_token(
        &self,
        amount: f64,
        from: &Address,
        to: &str,
        private_key: &PrivateKey,
    ) -> Result<TransactionReceipt> {
        let to = parse_address(to)?;
        if private_key.address() != *from {
            return Err(ChainError::Signing(format!(
                "private key does not control {from}"
            )));
        }
        let value = ether_from_f64(amount)?;

        let nonce = self.provider.get_transaction_count(*from).pending().await?;
        let gas_price = self.provider.get_gas_price().await?;
        let estimate = TransactionRequest::default()
            .with_from(*from)
            .with_to(to)
            .with_value(value);
        let gas_limit = self.provider.estimate_gas(estimate).await?;

        let transfer = Transfer {
            chain_id: self.chain_id,
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
        };
        let signed = transfer.sign(private_key)?;

        tracing::info!(
            %from,
            %to,
            amount = %format_ether(value),
            nonce,
            hash = %signed.hash,
            "submitting transfer"
        );
        let pending = self.provider.send_raw_transaction(&signed.raw).await?;
        let hash = *pending.tx_hash();
        if hash != signed.hash {
            tracing::warn!(local = %signed.hash, node = %hash, "node returned a different hash");
        }

        let receipt = poll_receipt(&self.options, hash, move || self.fetch_receipt(hash)).await?;
        tracing::info!(
            hash = %receipt.transaction_hash,
            status = receipt.status,
            block = ?receipt.block_number,
            "transfer mined"
        );
        Ok(receipt)
    }
}
