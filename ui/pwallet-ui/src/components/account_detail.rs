use dioxus::prelude::*;

use super::account_transactions::AccountTransactions;
use crate::account::Account;
use crate::balance::{fetch_display_balance, BalanceTracker};
use crate::form::TransferForm;
use crate::state::{SharedChainClient, TransferRecord, WalletState};
use crate::transfer::{initiate_transfer, StatusSink, TransferStatus};

impl StatusSink for Signal<TransferStatus> {
    fn publish(&mut self, status: TransferStatus) {
        self.set(status);
    }
}

#[component]
pub fn AccountDetailPage() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let account = wallet.read().account.clone();

    rsx! {
        div { class: "page",
            h1 { "Account" }
            p { class: "subtitle", "Balance and transfers" }

            if let Some(account) = account {
                AccountDetail { account }
            } else {
                p { class: "hint",
                    "No account loaded. Set the private key environment variable and restart."
                }
            }
        }
    }
}

#[component]
pub fn AccountDetail(account: Account) -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedChainClient>();

    let chain = wallet.read().chain.clone();
    let places = wallet.read().display_decimals;

    let mut form = use_signal(TransferForm::default);
    let status = use_signal(TransferStatus::default);
    let mut balance = use_signal(|| BalanceTracker::new(account.balance.clone()));

    // Refresh once per distinct address
    {
        let client = client.clone();
        use_effect(use_reactive((&account,), move |(account,)| {
            let Some(ticket) = balance.write().bind(account.address, &account.balance) else {
                return;
            };
            let client = client.clone();
            spawn(async move {
                let result = fetch_display_balance(&*client, ticket.address(), places).await;
                if let Err(e) = &result {
                    tracing::warn!(address = %ticket.address(), error = %e, "balance refresh failed");
                }
                balance.write().settle(ticket, result);
            });
        }));
    }

    let on_transfer = {
        let client = client.clone();
        let account = account.clone();
        let chain = chain.clone();
        move |_| {
            let client = client.clone();
            let account = account.clone();
            let chain = chain.clone();
            let request = form.read().clone();
            spawn(async move {
                let mut sink = status;
                let outcome = initiate_transfer(&*client, &account, &request, &chain, &mut sink).await;
                wallet
                    .write()
                    .history
                    .push(TransferRecord::new(account.address, &request, outcome));
            });
        }
    };

    let tracker = balance.read().clone();
    let current = status.read().clone();
    let can_submit = form.read().can_submit(&current);
    let destination = form.read().destination.clone();
    let amount_input = form.read().amount_input.clone();
    let symbol = chain.currency_symbol.clone();
    let address_url = chain.address_url(&account.address);

    rsx! {
        div { class: "result-card",
            p { class: "label", "Address" }
            p { class: "mono",
                a { href: "{address_url}", target: "_blank", rel: "noreferrer", "{account.address}" }
            }
            p { class: "balance-large", "{tracker.display()} {symbol}" }
            if tracker.is_refreshing() {
                p { class: "hint", "Refreshing..." }
            }
            if let Some(err) = tracker.error() {
                p { class: "error-text", "Could not refresh balance: {err}" }
            }
        }

        div { class: "form-group",
            label { "Destination Address" }
            input {
                class: "input input-wide",
                r#type: "text",
                placeholder: "0x...",
                value: "{destination}",
                oninput: move |e| form.write().set_destination(e.value()),
            }
        }

        div { class: "form-group",
            label { "Amount ({symbol})" }
            input {
                class: "input",
                r#type: "number",
                placeholder: "0.0",
                value: "{amount_input}",
                oninput: move |e| form.write().set_amount(e.value()),
            }
        }

        button {
            class: "btn btn-primary",
            disabled: !can_submit,
            onclick: on_transfer,
            if current.is_pending() { "Sending..." } else { "Send {amount_input} {symbol}" }
        }

        match &current {
            TransferStatus::Unset => rsx! {},
            TransferStatus::Pending => rsx! {
                p { class: "hint", "Transfer is pending..." }
            },
            TransferStatus::Complete { explorer_url, .. } => rsx! {
                p { class: "success-text",
                    "Transfer complete! "
                    a { href: "{explorer_url}", target: "_blank", rel: "noreferrer", "View transaction" }
                }
            },
            TransferStatus::Error(message) => rsx! {
                p { class: "error-text", "Error occurred while transferring tokens: {message}" }
            },
        }

        AccountTransactions { account: account.clone() }
    }
}
