//! Jupiter token directory client.
//!
//! Resolves a mint address to its descriptive metadata through
//! `GET {token_api}/token/{mint}`. Every call is a live round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ActionError, Result};

/// Metadata of a token as reported by the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenDescriptor {
    pub mint_address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub logo_url: String,
    pub tags: Vec<String>,
    pub daily_volume: f64,
    pub created_at: DateTime<Utc>,
    pub freeze_authority: Option<String>,
    pub mint_authority: Option<String>,
    pub permanent_delegate: Option<String>,
    pub minted_at: Option<DateTime<Utc>>,
    pub coingecko_id: Option<String>,
}

impl TokenDescriptor {
    /// Case-insensitive symbol comparison with full Unicode case folding.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol.to_lowercase() == symbol.to_lowercase()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    address: String,
    name: String,
    symbol: String,
    decimals: u8,
    #[serde(rename = "logoURI", default, deserialize_with = "null_as_default")]
    logo_uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    daily_volume: f64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    freeze_authority: Option<String>,
    #[serde(default)]
    mint_authority: Option<String>,
    #[serde(default)]
    permanent_delegate: Option<String>,
    #[serde(default)]
    minted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    extensions: Option<TokenExtensions>,
}

#[derive(Debug, Deserialize)]
struct TokenExtensions {
    #[serde(rename = "coingeckoId", default)]
    coingecko_id: Option<String>,
}

impl TokenResponse {
    fn into_descriptor(self) -> TokenDescriptor {
        TokenDescriptor {
            mint_address: self.address,
            name: self.name,
            symbol: self.symbol,
            decimals: self.decimals,
            logo_url: self.logo_uri,
            tags: self.tags,
            daily_volume: self.daily_volume,
            created_at: self.created_at,
            freeze_authority: self.freeze_authority,
            mint_authority: self.mint_authority,
            permanent_delegate: self.permanent_delegate,
            minted_at: self.minted_at,
            coingecko_id: self.extensions.and_then(|ext| ext.coingecko_id),
        }
    }
}

#[async_trait]
pub trait TokenDirectory: Send + Sync {
    async fn lookup_token(&self, mint_address: &str) -> Result<TokenDescriptor>;
}

/// HTTP client for the Jupiter token API.
#[derive(Debug, Clone)]
pub struct JupiterTokenClient {
    http: reqwest::Client,
    base_url: Url,
}

impl JupiterTokenClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ActionError::Config(format!("invalid token API url {base_url}: {e}")))?;
        Ok(Self { http, base_url })
    }

    fn token_url(&self, mint_address: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActionError::Config(format!("token API url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["token", mint_address]);
        Ok(url)
    }
}

#[async_trait]
impl TokenDirectory for JupiterTokenClient {
    async fn lookup_token(&self, mint_address: &str) -> Result<TokenDescriptor> {
        let url = self.token_url(mint_address)?;
        debug!(mint = mint_address, "Looking up token in Jupiter directory");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ActionError::NotFound(format!(
                "{mint_address} (status {})",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: Option<TokenResponse> = serde_json::from_str(&body)
            .map_err(|e| ActionError::Parse(format!("token response for {mint_address}: {e}")))?;

        token
            .map(TokenResponse::into_descriptor)
            .ok_or_else(|| ActionError::NotFound(mint_address.to_string()))
    }
}
