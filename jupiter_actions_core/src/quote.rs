use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ActionError, Result};

/// Subset of a Jupiter v6 quote response. Amounts are integer strings in
/// the smallest unit of the respective mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    #[serde(default)]
    pub input_mint: String,
    #[serde(default)]
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default)]
    pub other_amount_threshold: Option<String>,
    #[serde(default)]
    pub slippage_bps: Option<u16>,
    #[serde(default)]
    pub price_impact_pct: Option<String>,
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        raw_amount: &str,
        slippage_bps: u16,
    ) -> Result<SwapQuote>;
}

/// HTTP client for the Jupiter quote API.
#[derive(Debug, Clone)]
pub struct JupiterQuoteClient {
    http: reqwest::Client,
    base_url: Url,
}

impl JupiterQuoteClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ActionError::Config(format!("invalid quote API url {base_url}: {e}")))?;
        Ok(Self { http, base_url })
    }

    fn quote_url(
        &self,
        input_mint: &str,
        output_mint: &str,
        raw_amount: &str,
        slippage_bps: u16,
    ) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActionError::Config(format!("quote API url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("quote");
        url.query_pairs_mut()
            .append_pair("inputMint", input_mint)
            .append_pair("outputMint", output_mint)
            .append_pair("amount", raw_amount)
            .append_pair("slippageBps", &slippage_bps.to_string());
        Ok(url)
    }
}

#[async_trait]
impl QuoteSource for JupiterQuoteClient {
    async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        raw_amount: &str,
        slippage_bps: u16,
    ) -> Result<SwapQuote> {
        let url = self.quote_url(input_mint, output_mint, raw_amount, slippage_bps)?;
        debug!(
            input_mint,
            output_mint,
            amount = raw_amount,
            slippage_bps,
            "Requesting Jupiter quote"
        );

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ActionError::Api(format!("quote request failed ({status}): {body}")));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ActionError::Parse(format!("quote response: {e}")))
    }
}
