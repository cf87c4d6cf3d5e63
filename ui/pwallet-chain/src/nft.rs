//! ERC-721 metadata lookup and media classification.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::connect_http;
use crate::error::{ChainError, Result};

pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

sol! {
    interface IERC721Metadata {
        function tokenURI(uint256 tokenId) external view returns (string);
    }
}

/// uint256 token id.
pub type TokenId = U256;

/// Parse a decimal token id.
pub fn parse_token_id(input: &str) -> Result<TokenId> {
    let digits = input.trim();
    if digits.is_empty() {
        return Err(ChainError::Decode("empty token id".into()));
    }
    U256::from_str_radix(digits, 10)
        .map_err(|e| ChainError::Decode(format!("invalid token id {input}: {e}")))
}

/// A connected contract. Only produced by [`ContractClient::connect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    pub address: Address,
}

#[async_trait]
pub trait ContractClient: Send + Sync {
    /// Check that `address` holds contract code.
    async fn connect(&self, address: &Address) -> Result<ContractHandle>;

    /// Metadata of one token; `None` when the token does not exist or has
    /// no metadata URI.
    async fn fetch_metadata(
        &self,
        contract: &ContractHandle,
        token_id: &TokenId,
    ) -> Result<Option<NftMetadata>>;
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    /// token id, filled in after fetching; any `id` in the document is
    /// ignored
    #[serde(skip_deserializing)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub animation_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub trait_type: Option<String>,
    #[serde(default)]
    pub display_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl Attribute {
    /// Value as display text, without quotes around strings.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl NftMetadata {
    /// The media to show and how to show it.
    ///
    /// `animation_url` wins over `image`; an animation without a recognised
    /// type is treated as an embedded page, an image without one as an image.
    pub fn media(&self) -> Option<(MediaKind, &str)> {
        if let Some(uri) = non_empty(&self.animation_url) {
            let kind = match MediaKind::from_uri(uri) {
                MediaKind::Unknown => MediaKind::Html,
                kind => kind,
            };
            return Some((kind, uri));
        }
        let uri = non_empty(&self.image)?;
        let kind = match MediaKind::from_uri(uri) {
            MediaKind::Unknown => MediaKind::Image,
            kind => kind,
        };
        Some((kind, uri))
    }

    /// Point `ipfs://` media links at an HTTP gateway.
    pub fn rewrite_ipfs(&mut self, gateway: &str) {
        for field in [&mut self.image, &mut self.animation_url, &mut self.external_url] {
            if let Some(uri) = field.as_mut() {
                *uri = gateway_url(uri, gateway);
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// How a media URI should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Model,
    Html,
    Unknown,
}

impl MediaKind {
    /// Classify by data-URI mime type or by file extension.
    pub fn from_uri(uri: &str) -> Self {
        if let Some(rest) = uri.strip_prefix("data:") {
            let mime = rest.split([';', ',']).next().unwrap_or_default();
            return Self::from_mime(&mime.to_ascii_lowercase());
        }

        let path = uri.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        let Some((_, ext)) = file.rsplit_once('.') else {
            return Self::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "avif" | "bmp" => Self::Image,
            "mp4" | "webm" | "mov" | "m4v" | "ogv" => Self::Video,
            "mp3" | "wav" | "ogg" | "oga" | "flac" | "m4a" => Self::Audio,
            "glb" | "gltf" | "usdz" => Self::Model,
            "html" | "htm" => Self::Html,
            _ => Self::Unknown,
        }
    }

    fn from_mime(mime: &str) -> Self {
        match mime.split('/').next() {
            Some("image") => Self::Image,
            Some("video") => Self::Video,
            Some("audio") => Self::Audio,
            Some("model") => Self::Model,
            _ if mime == "text/html" => Self::Html,
            _ => Self::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// URI resolution
// ---------------------------------------------------------------------------

/// Where metadata JSON comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataSource {
    Inline(Vec<u8>),
    Remote(String),
}

pub fn resolve_uri(uri: &str, gateway: &str) -> Result<MetadataSource> {
    let uri = uri.trim();
    if let Some(rest) = uri.strip_prefix("data:") {
        let (header, body) = rest
            .split_once(',')
            .ok_or_else(|| ChainError::Decode("data URI without payload".into()))?;
        let bytes = if header.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(body.trim())
                .map_err(|e| ChainError::Decode(format!("bad base64 metadata: {e}")))?
        } else {
            body.as_bytes().to_vec()
        };
        return Ok(MetadataSource::Inline(bytes));
    }
    if uri.starts_with("ipfs://") {
        return Ok(MetadataSource::Remote(gateway_url(uri, gateway)));
    }
    if uri.starts_with("https://") || uri.starts_with("http://") {
        return Ok(MetadataSource::Remote(uri.to_string()));
    }
    Err(ChainError::Decode(format!("unsupported metadata URI: {uri}")))
}

/// `ipfs://<cid>/<path>` (or `ipfs://ipfs/<cid>`) -> `<gateway>/<cid>/<path>`.
/// Other URIs are returned unchanged.
pub fn gateway_url(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(rest) => {
            let rest = rest.strip_prefix("ipfs/").unwrap_or(rest);
            format!("{}/{}", gateway.trim_end_matches('/'), rest)
        }
        None => uri.to_string(),
    }
}

/// Calldata for `tokenURI(token_id)`.
pub fn token_uri_call(token_id: &TokenId) -> Vec<u8> {
    IERC721Metadata::tokenURICall { tokenId: *token_id }.abi_encode()
}

/// Decode the `string` returned by `tokenURI`.
pub fn decode_token_uri(data: &[u8]) -> Result<String> {
    IERC721Metadata::tokenURICall::abi_decode_returns(data)
        .map_err(|e| ChainError::Decode(format!("tokenURI return: {e}")))
}

// ---------------------------------------------------------------------------
// Erc721Client
// ---------------------------------------------------------------------------

/// [`ContractClient`] for ERC-721 contracts over JSON-RPC.
pub struct Erc721Client {
    provider: DynProvider,
    http: reqwest::Client,
    ipfs_gateway: String,
}

impl Erc721Client {
    pub fn new(rpc_url: &str, ipfs_gateway: &str) -> Result<Self> {
        Ok(Self {
            provider: connect_http(rpc_url)?,
            http: reqwest::Client::new(),
            ipfs_gateway: ipfs_gateway.to_string(),
        })
    }

    async fn load(&self, source: MetadataSource) -> Result<Vec<u8>> {
        match source {
            MetadataSource::Inline(bytes) => Ok(bytes),
            MetadataSource::Remote(url) => {
                tracing::debug!(%url, "fetching metadata");
                let response = self.http.get(&url).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

#[async_trait]
impl ContractClient for Erc721Client {
    async fn connect(&self, address: &Address) -> Result<ContractHandle> {
        let code = self.provider.get_code_at(*address).await?;
        if code.is_empty() {
            return Err(ChainError::NoContract(address.to_string()));
        }
        tracing::debug!(%address, code_len = code.len(), "connected to contract");
        Ok(ContractHandle { address: *address })
    }

    async fn fetch_metadata(
        &self,
        contract: &ContractHandle,
        token_id: &TokenId,
    ) -> Result<Option<NftMetadata>> {
        let call = TransactionRequest::default()
            .with_to(contract.address)
            .with_input(token_uri_call(token_id));
        let raw = match self.provider.call(call).await.map_err(ChainError::from) {
            Ok(raw) => raw,
            Err(e) if e.is_revert() => {
                tracing::debug!(contract = %contract.address, %token_id, error = %e, "tokenURI reverted");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let uri = decode_token_uri(&raw)?;
        if uri.trim().is_empty() {
            return Ok(None);
        }

        let bytes = self.load(resolve_uri(&uri, &self.ipfs_gateway)?).await?;
        let mut metadata: NftMetadata = serde_json::from_slice(&bytes)?;
        metadata.id = token_id.to_string();
        metadata.rewrite_ipfs(&self.ipfs_gateway);
        Ok(Some(metadata))
    }
}
