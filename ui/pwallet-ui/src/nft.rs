//! Loading the configured NFT for display.

use pwallet_chain::{Address, ContractClient, NftMetadata, TokenId};

/// What the NFT page shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NftView {
    /// Contract or metadata lookup still in flight.
    #[default]
    Loading,
    NotFound,
    Rendered(NftMetadata),
}

/// Connect to `contract` and fetch `token_id`'s metadata.
///
/// Lookup failures are logged and shown as `NotFound`.
pub async fn load_nft<C>(client: &C, contract: &Address, token_id: &TokenId) -> NftView
where
    C: ContractClient + ?Sized,
{
    let handle = match client.connect(contract).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(contract = %contract, error = %e, "cannot reach NFT contract");
            return NftView::NotFound;
        }
    };

    match client.fetch_metadata(&handle, token_id).await {
        Ok(Some(metadata)) => {
            tracing::debug!(contract = %contract, token = %token_id, "NFT metadata loaded");
            NftView::Rendered(metadata)
        }
        Ok(None) => {
            tracing::info!(contract = %contract, token = %token_id, "NFT not found");
            NftView::NotFound
        }
        Err(e) => {
            tracing::warn!(contract = %contract, token = %token_id, error = %e, "NFT metadata lookup failed");
            NftView::NotFound
        }
    }
}
