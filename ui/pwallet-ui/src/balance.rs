//! Balance refresh bookkeeping.
//!
//! One fetch per distinct bound address. Each fetch carries a ticket; a
//! result whose ticket is older than the latest bind is dropped, so a slow
//! response for a previous account never overwrites the current one.

use pwallet_chain::units::display_balance;
use pwallet_chain::{Address, ChainClient, ChainError};

/// Issued by [`BalanceTracker::bind`], handed back with the fetch result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceTicket {
    generation: u64,
    address: Address,
}

impl BalanceTicket {
    pub fn address(&self) -> &Address {
        &self.address
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BalanceTracker {
    display: String,
    error: Option<String>,
    refreshing: bool,
    bound: Option<Address>,
    generation: u64,
}

impl BalanceTracker {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            display: initial.into(),
            error: None,
            refreshing: false,
            bound: None,
            generation: 0,
        }
    }

    /// Balance as last displayed; kept across failed refreshes.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Why the latest refresh failed, if it did.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Bind to `address`, showing `known_balance` until the fetch resolves.
    ///
    /// Returns `None` when already bound to that address: nothing to fetch.
    pub fn bind(&mut self, address: Address, known_balance: &str) -> Option<BalanceTicket> {
        if self.bound == Some(address) {
            return None;
        }
        if self.bound.is_some() {
            self.display = known_balance.to_string();
        }
        self.bound = Some(address);
        self.generation += 1;
        self.refreshing = true;
        self.error = None;
        Some(BalanceTicket {
            generation: self.generation,
            address,
        })
    }

    /// Apply a fetch result. Returns false when the ticket is stale.
    pub fn settle(&mut self, ticket: BalanceTicket, result: Result<String, ChainError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(address = %ticket.address, "discarding stale balance");
            return false;
        }
        self.refreshing = false;
        match result {
            Ok(display) => {
                self.display = display;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }
}

/// Native balance of `address`, formatted for display.
pub async fn fetch_display_balance<C>(
    client: &C,
    address: &Address,
    places: u32,
) -> Result<String, ChainError>
where
    C: ChainClient + ?Sized,
{
    let wei = client.get_balance(address).await?;
    Ok(display_balance(wei, places))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pwallet_chain::{PrivateKey, TransactionReceipt, U256};

    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn alice() -> Address {
        addr("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
    }

    fn bob() -> Address {
        addr("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")
    }

    struct FixedBalance {
        wei: Result<U256, ChainError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChainClient for FixedBalance {
        async fn chain_id(&self) -> pwallet_chain::Result<u64> {
            Ok(1)
        }

        async fn get_balance(&self, _address: &Address) -> pwallet_chain::Result<U256> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.wei.clone()
        }

        async fn send_token(
            &self,
            _amount: f64,
            _from: &Address,
            _to: &str,
            _private_key: &PrivateKey,
        ) -> pwallet_chain::Result<TransactionReceipt> {
            unreachable!("balance tests never send")
        }
    }

    #[test]
    fn binds_once_per_address() {
        let mut tracker = BalanceTracker::new("0");
        assert!(tracker.bind(alice(), "0").is_some());
        assert!(tracker.is_refreshing());
        assert!(tracker.bind(alice(), "0").is_none());
        assert!(tracker.bind(bob(), "7").is_some());
        assert!(tracker.bind(bob(), "7").is_none());
        // switching back is a new address again
        assert!(tracker.bind(alice(), "0").is_some());
    }

    #[test]
    fn stale_result_never_overwrites_newer_account() {
        let mut tracker = BalanceTracker::new("0");
        let first = tracker.bind(alice(), "0").unwrap();
        let second = tracker.bind(bob(), "0").unwrap();

        assert!(tracker.settle(second, Ok("3.5".into())));
        assert_eq!(tracker.display(), "3.5");

        // alice's slow response arrives late
        assert!(!tracker.settle(first, Ok("100".into())));
        assert_eq!(tracker.display(), "3.5");
        // still bound to bob
        assert!(tracker.bind(bob(), "0").is_none());
    }

    #[test]
    fn rebinding_shows_the_new_accounts_known_balance() {
        let mut tracker = BalanceTracker::new("1");
        let ticket = tracker.bind(alice(), "1").unwrap();
        tracker.settle(ticket, Ok("2".into()));
        tracker.bind(bob(), "9").unwrap();
        assert_eq!(tracker.display(), "9");
    }

    #[test]
    fn failure_keeps_last_balance_and_records_error() {
        let mut tracker = BalanceTracker::new("0");
        let ticket = tracker.bind(alice(), "0").unwrap();
        tracker.settle(ticket, Ok("1.25".into()));

        let ticket = tracker.bind(bob(), "1.25").unwrap();
        assert!(tracker.settle(ticket, Err(ChainError::Http("connection refused".into()))));
        assert_eq!(tracker.display(), "1.25");
        assert!(!tracker.is_refreshing());
        assert!(tracker.error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn fetch_formats_to_requested_places() {
        let client = FixedBalance {
            wei: Ok(U256::from(1_234_567_000_000_000_000u128)),
            calls: AtomicUsize::new(0),
        };
        assert_eq!(fetch_display_balance(&client, &alice(), 2).await.unwrap(), "1.23");
        assert_eq!(fetch_display_balance(&client, &alice(), 4).await.unwrap(), "1.2346");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_returned() {
        let client = FixedBalance {
            wei: Err(ChainError::Timeout("eth_getBalance".into())),
            calls: AtomicUsize::new(0),
        };
        let err = fetch_display_balance(&client, &alice(), 2).await.unwrap_err();
        assert!(matches!(err, ChainError::Timeout(_)));
    }
}
