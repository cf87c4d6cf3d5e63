use dioxus::prelude::*;
use pwallet_chain::{MediaKind, NftMetadata};

use crate::nft::{load_nft, NftView};
use crate::state::{SharedContractClient, WalletState};

#[component]
pub fn NftRenderPage() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedContractClient>();

    // No reactive reads inside, so this runs once per mount
    let target = wallet.peek().nft.clone();
    let view = use_resource(move || {
        let client = client.clone();
        let target = target.clone();
        async move { load_nft(&*client, &target.contract, &target.token_id).await }
    });

    let current = match &*view.read() {
        Some(loaded) => loaded.clone(),
        None => NftView::Loading,
    };

    rsx! {
        div { class: "page",
            h1 { "NFT" }
            match current {
                NftView::Loading => rsx! {
                    p { class: "hint", span { class: "spinner" } " Loading..." }
                },
                NftView::NotFound => rsx! {
                    p { class: "empty-desc", "NFT not found" }
                },
                NftView::Rendered(metadata) => rsx! {
                    NftMedia { metadata }
                },
            }
        }
    }
}

/// Media plus name, description and traits of one token.
#[component]
pub fn NftMedia(metadata: NftMetadata) -> Element {
    let name = metadata
        .name
        .clone()
        .unwrap_or_else(|| format!("#{}", metadata.id));
    let media = metadata.media().map(|(kind, uri)| (kind, uri.to_string()));
    let poster = metadata.image.clone().unwrap_or_default();

    rsx! {
        div { class: "nft-card",
            match media {
                Some((MediaKind::Image, src)) => rsx! {
                    img { class: "nft-media", src: "{src}", alt: "{name}" }
                },
                Some((MediaKind::Video, src)) => rsx! {
                    video {
                        class: "nft-media",
                        src: "{src}",
                        poster: "{poster}",
                        controls: true,
                        autoplay: true,
                        muted: true,
                        r#loop: true,
                    }
                },
                Some((MediaKind::Audio, src)) => rsx! {
                    if !poster.is_empty() {
                        img { class: "nft-media", src: "{poster}", alt: "{name}" }
                    }
                    audio { class: "nft-audio", src: "{src}", controls: true }
                },
                Some((MediaKind::Html, src)) => rsx! {
                    iframe { class: "nft-media", src: "{src}", "sandbox": "allow-scripts" }
                },
                Some((MediaKind::Model | MediaKind::Unknown, src)) => rsx! {
                    if !poster.is_empty() {
                        img { class: "nft-media", src: "{poster}", alt: "{name}" }
                    }
                    a { class: "link", href: "{src}", target: "_blank", rel: "noreferrer", "Open media" }
                },
                None => rsx! {
                    div { class: "nft-media nft-placeholder", "No media" }
                },
            }

            h2 { "{name}" }
            if let Some(description) = metadata.description.as_ref() {
                p { class: "subtitle", "{description}" }
            }
            if let Some(url) = metadata.external_url.as_ref() {
                a { class: "link", href: "{url}", target: "_blank", rel: "noreferrer", "Website" }
            }
            if !metadata.attributes.is_empty() {
                ul { class: "nft-attributes",
                    for attribute in metadata.attributes.iter() {
                        li {
                            span { class: "label", "{attribute.trait_type.clone().unwrap_or_default()}" }
                            span { class: "mono", "{attribute.value_text()}" }
                        }
                    }
                }
            }
        }
    }
}
