use dioxus::prelude::*;

use crate::state::{ChainStatus, SharedChainClient, WalletState};

/// Ask the node which chain it serves and record the answer.
async fn check_chain(mut wallet: Signal<WalletState>, client: SharedChainClient) {
    let expected = wallet.read().chain.chain_id;
    wallet.write().chain_status = ChainStatus::Checking;

    let status = ChainStatus::from_reported(expected, client.chain_id().await);
    match &status {
        ChainStatus::Connected(id) => tracing::info!(chain_id = id, "RPC endpoint reachable"),
        ChainStatus::WrongChain { expected, actual } => {
            tracing::warn!(expected, actual, "RPC endpoint serves a different chain")
        }
        ChainStatus::Error(e) => tracing::warn!(error = %e, "RPC endpoint unreachable"),
        ChainStatus::Checking => {}
    }
    wallet.write().chain_status = status;
}

#[component]
pub fn ChainStatusIndicator() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedChainClient>();

    // Check once on mount
    {
        let client = client.clone();
        use_hook(move || {
            spawn(check_chain(wallet, client));
        });
    }

    let status = wallet.read().chain_status.clone();
    let chain_name = wallet.read().chain.name.clone();
    let reported = match &status {
        ChainStatus::WrongChain { actual, .. } => wallet.read().network_label(*actual),
        _ => String::new(),
    };

    let (dot_class, label) = match &status {
        ChainStatus::Checking => ("dot connecting", "Checking".to_string()),
        ChainStatus::Connected(_) => ("dot connected", chain_name),
        ChainStatus::WrongChain { .. } => ("dot error", format!("Wrong chain: {reported}")),
        ChainStatus::Error(_) => ("dot disconnected", "Unreachable".to_string()),
    };
    let title = match &status {
        ChainStatus::Error(e) => e.clone(),
        _ => String::new(),
    };

    let recheck = move |_| {
        spawn(check_chain(wallet, client.clone()));
    };

    rsx! {
        div { class: "conn-indicator", title: "{title}",
            span { class: dot_class }
            span { class: "conn-label", "{label}" }
            if !matches!(status, ChainStatus::Connected(_)) {
                button {
                    class: "conn-btn conn-btn-connect",
                    disabled: matches!(status, ChainStatus::Checking),
                    onclick: recheck,
                    "Retry"
                }
            }
        }
    }
}
