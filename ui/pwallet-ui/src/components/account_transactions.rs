use dioxus::prelude::*;

use crate::account::Account;
use crate::state::WalletState;
use crate::transfer::TransferOutcome;

/// Transfers sent from `account` this session, newest first.
#[component]
pub fn AccountTransactions(account: Account) -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let chain = wallet.read().chain.clone();
    let records = wallet.read().history_for(&account.address);
    let explorer = chain.address_url(&account.address);

    rsx! {
        div { class: "history",
            h2 { "Recent transfers" }
            if records.is_empty() {
                p { class: "hint", "No transfers yet this session." }
            }
            ul { class: "history-list",
                for record in records {
                    {
                        let row_class = match record.outcome {
                            TransferOutcome::Confirmed(_) => "history-row success-text",
                            _ => "history-row error-text",
                        };
                        let tx_url = record.tx_hash().map(|hash| chain.tx_url(&hash));
                        let detail = match &record.outcome {
                            TransferOutcome::Errored(message) => message.clone(),
                            _ => String::new(),
                        };
                        rsx! {
                            li { class: row_class,
                                span { class: "history-status", "{record.label()}" }
                                span { "{record.amount} {chain.currency_symbol} to " }
                                span { class: "mono", "{record.destination}" }
                                if let Some(url) = tx_url {
                                    a { href: "{url}", target: "_blank", rel: "noreferrer", "View" }
                                }
                                if !detail.is_empty() {
                                    span { class: "history-detail", "{detail}" }
                                }
                            }
                        }
                    }
                }
            }
            a { class: "link", href: "{explorer}", target: "_blank", rel: "noreferrer",
                "All transactions on the block explorer"
            }
        }
    }
}
