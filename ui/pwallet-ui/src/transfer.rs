//! Token transfer status machine.
//!
//! `Unset -> Pending -> Complete | Error`. Every submission goes back through
//! `Pending`, so a finished transfer can be followed by another one.

use pwallet_chain::{ChainClient, ChainError, ChainProfile, TransactionReceipt};

use crate::account::Account;
use crate::form::TransferForm;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TransferStatus {
    #[default]
    Unset,
    Pending,
    Complete {
        tx_hash: String,
        explorer_url: String,
    },
    /// Message shown to the user as is.
    Error(String),
}

impl TransferStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransferStatus::Pending)
    }
}

/// How a submitted transfer ended.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferOutcome {
    /// Mined with a success status.
    Confirmed(TransactionReceipt),
    /// Mined, but execution failed.
    Failed(TransactionReceipt),
    /// Never produced a receipt: rejected before or during submission.
    Errored(String),
}

impl TransferOutcome {
    pub fn from_result(result: Result<TransactionReceipt, ChainError>) -> Self {
        match result {
            Ok(receipt) if receipt.is_success() => TransferOutcome::Confirmed(receipt),
            Ok(receipt) => TransferOutcome::Failed(receipt),
            Err(err) => TransferOutcome::Errored(error_message(&err)),
        }
    }

    pub fn receipt(&self) -> Option<&TransactionReceipt> {
        match self {
            TransferOutcome::Confirmed(receipt) | TransferOutcome::Failed(receipt) => Some(receipt),
            TransferOutcome::Errored(_) => None,
        }
    }

    /// Status the UI should settle on for this outcome.
    pub fn status(&self, chain: &ChainProfile) -> TransferStatus {
        match self {
            TransferOutcome::Confirmed(receipt) => {
                let tx_hash = receipt.transaction_hash.to_string();
                TransferStatus::Complete {
                    explorer_url: chain.tx_url(&tx_hash),
                    tx_hash,
                }
            }
            TransferOutcome::Failed(receipt) => TransferStatus::Error(receipt.to_json()),
            TransferOutcome::Errored(message) => TransferStatus::Error(message.clone()),
        }
    }
}

/// The error's own reason when it has one, otherwise its serialized form.
pub fn error_message(err: &ChainError) -> String {
    err.reason().unwrap_or_else(|| err.serialized())
}

/// Receives status changes in the order they happen.
pub trait StatusSink {
    fn publish(&mut self, status: TransferStatus);
}

impl StatusSink for TransferStatus {
    fn publish(&mut self, status: TransferStatus) {
        *self = status;
    }
}

/// Send `form.amount` from `account` to `form.destination`.
///
/// `Pending` is published before the client is called; exactly one terminal
/// status follows once the client resolves.
pub async fn initiate_transfer<C, S>(
    client: &C,
    account: &Account,
    form: &TransferForm,
    chain: &ChainProfile,
    sink: &mut S,
) -> TransferOutcome
where
    C: ChainClient + ?Sized,
    S: StatusSink,
{
    sink.publish(TransferStatus::Pending);
    tracing::info!(
        from = %account.address,
        to = %form.destination,
        amount = form.amount,
        chain = %chain.name,
        "transfer submitted"
    );

    let result = client
        .send_token(
            form.amount,
            &account.address,
            &form.destination,
            &account.private_key,
        )
        .await;
    let outcome = TransferOutcome::from_result(result);

    match &outcome {
        TransferOutcome::Confirmed(receipt) => {
            tracing::info!(tx = %receipt.transaction_hash, "transfer confirmed");
        }
        TransferOutcome::Failed(receipt) => {
            tracing::warn!(tx = %receipt.transaction_hash, status = receipt.status, "transfer reverted");
        }
        TransferOutcome::Errored(message) => {
            tracing::error!(error = %message, "transfer failed");
        }
    }

    sink.publish(outcome.status(chain));
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pwallet_chain::{Address, PrivateKey, U256};

    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    /// Records every published status.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<TransferStatus>>>);

    impl Recorder {
        fn history(&self) -> Vec<TransferStatus> {
            self.0.lock().unwrap().clone()
        }
    }

    impl StatusSink for Recorder {
        fn publish(&mut self, status: TransferStatus) {
            self.0.lock().unwrap().push(status);
        }
    }

    /// Answers `send_token` with a canned result and remembers what the
    /// recorder held at the moment it was called.
    struct MockChain {
        result: Mutex<Option<Result<TransactionReceipt, ChainError>>>,
        recorder: Recorder,
        seen_at_call: Mutex<Vec<TransferStatus>>,
        requests: Mutex<Vec<(f64, String)>>,
    }

    impl MockChain {
        fn new(result: Result<TransactionReceipt, ChainError>, recorder: Recorder) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                recorder,
                seen_at_call: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn chain_id(&self) -> pwallet_chain::Result<u64> {
            Ok(137)
        }

        async fn get_balance(&self, _address: &Address) -> pwallet_chain::Result<U256> {
            Ok(U256::ZERO)
        }

        async fn send_token(
            &self,
            amount: f64,
            _from: &Address,
            to: &str,
            _private_key: &PrivateKey,
        ) -> pwallet_chain::Result<TransactionReceipt> {
            *self.seen_at_call.lock().unwrap() = self.recorder.history();
            self.requests.lock().unwrap().push((amount, to.to_string()));
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("send_token called more than once")
        }
    }

    fn account() -> Account {
        Account::from_private_key(KEY.parse().unwrap())
    }

    fn form(amount: &str) -> TransferForm {
        let mut form = TransferForm::default();
        form.set_destination("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".into());
        form.set_amount(amount.into());
        form
    }

    fn receipt(status: u64) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: TX_HASH.parse().unwrap(),
            block_hash: None,
            block_number: Some(46147),
            from: account().address,
            to: Some("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap()),
            gas_used: 21_000,
            effective_gas_price: 30_000_000_000,
            status,
        }
    }

    #[tokio::test]
    async fn successful_receipt_completes_with_explorer_link() {
        let recorder = Recorder::default();
        let chain = MockChain::new(Ok(receipt(1)), recorder.clone());
        let profile = ChainProfile::polygon();
        let mut sink = recorder.clone();

        let outcome = initiate_transfer(&chain, &account(), &form("0.5"), &profile, &mut sink).await;

        assert_eq!(outcome, TransferOutcome::Confirmed(receipt(1)));
        assert_eq!(*chain.seen_at_call.lock().unwrap(), vec![TransferStatus::Pending]);
        assert_eq!(
            *chain.requests.lock().unwrap(),
            vec![(0.5, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string())]
        );
        assert_eq!(
            recorder.history(),
            vec![
                TransferStatus::Pending,
                TransferStatus::Complete {
                    tx_hash: TX_HASH.to_string(),
                    explorer_url: format!("https://polygonscan.com/tx/{TX_HASH}"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn failed_receipt_shows_serialized_receipt() {
        let recorder = Recorder::default();
        let chain = MockChain::new(Ok(receipt(0)), recorder.clone());
        let mut sink = recorder.clone();

        let outcome =
            initiate_transfer(&chain, &account(), &form("1"), &ChainProfile::polygon(), &mut sink)
                .await;

        assert!(matches!(outcome, TransferOutcome::Failed(_)));
        let history = recorder.history();
        assert_eq!(history.len(), 2);
        match &history[1] {
            TransferStatus::Error(message) => {
                assert_eq!(message, &receipt(0).to_json());
                assert!(message.contains(TX_HASH));
            }
            other => panic!("expected error status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn node_reason_is_shown_verbatim() {
        let recorder = Recorder::default();
        let err = ChainError::Rpc {
            code: -32000,
            message: "insufficient funds".into(),
        };
        let chain = MockChain::new(Err(err), recorder.clone());
        let mut sink = recorder.clone();

        let outcome =
            initiate_transfer(&chain, &account(), &form("1"), &ChainProfile::polygon(), &mut sink)
                .await;

        assert_eq!(outcome, TransferOutcome::Errored("insufficient funds".into()));
        assert_eq!(
            recorder.history().last(),
            Some(&TransferStatus::Error("insufficient funds".into()))
        );
    }

    #[tokio::test]
    async fn error_without_reason_is_serialized() {
        let recorder = Recorder::default();
        let err = ChainError::Http("connection refused".into());
        let expected = err.serialized();
        let chain = MockChain::new(Err(err), recorder.clone());
        let mut sink = recorder.clone();

        initiate_transfer(&chain, &account(), &form("1"), &ChainProfile::polygon(), &mut sink).await;

        assert_eq!(recorder.history().last(), Some(&TransferStatus::Error(expected)));
    }

    #[tokio::test]
    async fn completed_transfer_can_be_followed_by_another() {
        let profile = ChainProfile::polygon();
        let mut status = TransferStatus::Unset;

        let first = MockChain::new(Ok(receipt(1)), Recorder::default());
        initiate_transfer(&first, &account(), &form("1"), &profile, &mut status).await;
        assert!(matches!(status, TransferStatus::Complete { .. }));

        let second = MockChain::new(
            Err(ChainError::InvalidAddress("nope".into())),
            Recorder::default(),
        );
        initiate_transfer(&second, &account(), &form("2"), &profile, &mut status).await;
        assert!(matches!(status, TransferStatus::Error(_)));
    }

    #[test]
    fn outcome_exposes_receipt_only_when_mined() {
        assert!(TransferOutcome::Confirmed(receipt(1)).receipt().is_some());
        assert!(TransferOutcome::Failed(receipt(0)).receipt().is_some());
        assert!(TransferOutcome::Errored("x".into()).receipt().is_none());
    }
}
