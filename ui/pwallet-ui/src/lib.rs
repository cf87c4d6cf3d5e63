#![allow(non_snake_case)]
//! Dioxus wallet for EVM chains: account balance, native token transfers and
//! a single NFT display.
//!
//! The binary builds an [`state::AppContext`] from the config and hands it to
//! [`App`] as root context.

pub mod account;
pub mod balance;
pub mod components;
pub mod config;
pub mod form;
pub mod nft;
pub mod state;
pub mod transfer;

use dioxus::prelude::*;

use state::{AppContext, ChainStatus, SharedChainClient, SharedContractClient, WalletState};

const STYLE: &str = include_str!("../assets/style.css");

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/account")]
    Account {},
    #[route("/nft")]
    Nft {},
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Provide shared state to all components
    use_context_provider(|| Signal::new(ctx.initial_state()));
    use_context_provider::<SharedChainClient>(|| ctx.chain_client.clone());
    use_context_provider::<SharedContractClient>(|| ctx.contract_client.clone());

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout: sidebar + content
// ---------------------------------------------------------------------------

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::Sidebar {}
            div { class: "main-panel",
                components::layout::TopBar {}
                div { class: "main-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route components: thin wrappers around the real components
// ---------------------------------------------------------------------------

#[component]
fn Home() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let state = wallet.read();
    let chain = state.chain.clone();
    let has_account = state.account.is_some();
    let wrong_chain = match state.chain_status {
        ChainStatus::WrongChain { expected, actual } => {
            Some((expected, state.network_label(actual)))
        }
        _ => None,
    };
    drop(state);

    rsx! {
        div { class: "page",
            h1 { "pwallet" }
            p { class: "subtitle", "{chain.name} · chain {chain.chain_id} · {chain.currency_symbol}" }
            if let Some((expected, actual)) = wrong_chain {
                p { class: "error-text",
                    "The RPC endpoint serves {actual}, but {chain.name} is chain {expected}. Transfers will be rejected."
                }
            }
            if has_account {
                p { class: "hint", "Open Account to check the balance or send {chain.currency_symbol}." }
            } else {
                div { class: "connect-nudge",
                    p { class: "empty-desc",
                        "No account loaded. Export a hex private key in the configured environment variable and restart."
                    }
                }
            }
        }
    }
}

#[component]
fn Account() -> Element {
    rsx! { components::account_detail::AccountDetailPage {} }
}

#[component]
fn Nft() -> Element {
    rsx! { components::nft_render::NftRenderPage {} }
}
