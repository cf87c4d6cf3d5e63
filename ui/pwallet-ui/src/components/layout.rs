use dioxus::prelude::*;

use pwallet_chain::address::short_address;

use super::chain_status::ChainStatusIndicator;
use crate::state::WalletState;
use crate::Route;

#[component]
pub fn Sidebar() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let network = wallet.read().chain.name.clone();

    rsx! {
        nav { class: "sidebar",
            div { class: "sidebar-brand",
                span { class: "brand-icon", "◈" }
                span { class: "brand-text", "pwallet" }
            }
            div { class: "sidebar-nav",
                NavSection { label: "Wallet" }
                NavLink { to: Route::Home {}, label: "Overview", icon: "⌂" }
                NavLink { to: Route::Account {}, label: "Account", icon: "◎" }
                NavSection { label: "Collectibles" }
                NavLink { to: Route::Nft {}, label: "NFT", icon: "✦" }
            }
            div { class: "sidebar-footer",
                span { class: "sidebar-footer-text", "{network}" }
            }
        }
    }
}

#[component]
pub fn TopBar() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let account = wallet.read().account.as_ref().map(|a| short_address(&a.address));

    rsx! {
        header { class: "topbar",
            div { class: "topbar-left",
                if let Some(address) = account {
                    div { class: "topbar-account",
                        span { class: "topbar-label", "Account" }
                        span { class: "topbar-value mono", "{address}" }
                    }
                } else {
                    span { class: "topbar-label", "No account loaded" }
                }
            }
            div { class: "topbar-right",
                ChainStatusIndicator {}
            }
        }
    }
}

#[component]
fn NavSection(label: &'static str) -> Element {
    rsx! {
        div { class: "nav-section-label", "{label}" }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { class: "nav-link", to: to,
            span { class: "nav-icon", "{icon}" }
            span { "{label}" }
        }
    }
}
