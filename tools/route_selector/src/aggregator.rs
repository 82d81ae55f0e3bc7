//! External DEX aggregator quoting (Jupiter v6 API shape).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

/// A quote the aggregator is willing to execute, with the opaque response
/// kept around for the swap-transaction request.
#[derive(Debug, Clone)]
pub struct AggregatorQuote {
    pub out_amount: u64,
    pub route_label: String,
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait AggregatorApi: Send + Sync {
    /// None means "no route" (including upstream errors; the caller treats
    /// an unreachable aggregator the same as an empty order book).
    async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<Option<AggregatorQuote>>;

    /// Base64 transaction that would execute `quote` for `user`.
    async fn swap_transaction(&self, quote: &AggregatorQuote, user: &str) -> Result<String>;
}

pub struct JupiterClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    out_amount: String,
    route_plan: Vec<RoutePlanStep>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutePlanStep {
    swap_info: SwapInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapInfo {
    label: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapResponse {
    swap_transaction: String,
}

impl JupiterClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AggregatorApi for JupiterClient {
    async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<Option<AggregatorQuote>> {
        let url = format!(
            "{}/quote?inputMint={input_mint}&outputMint={output_mint}&amount={amount}&swapMode=ExactIn",
            self.base_url
        );
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, "aggregator unreachable, treating as no route");
                return Ok(None);
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "aggregator quote rejected");
            return Ok(None);
        }
        let raw: serde_json::Value = response.json().await.context("parse quote body")?;
        let parsed: QuoteResponse =
            serde_json::from_value(raw.clone()).context("decode quote response")?;
        let out_amount: u64 = parsed.out_amount.parse().context("parse outAmount")?;
        if out_amount == 0 {
            return Ok(None);
        }
        let route_label = parsed
            .route_plan
            .iter()
            .filter_map(|step| step.swap_info.label.as_deref())
            .collect::<Vec<_>>()
            .join(" -> ");
        Ok(Some(AggregatorQuote {
            out_amount,
            route_label,
            raw,
        }))
    }

    async fn swap_transaction(&self, quote: &AggregatorQuote, user: &str) -> Result<String> {
        let url = format!("{}/swap", self.base_url);
        let body = serde_json::json!({
            "quoteResponse": quote.raw,
            "userPublicKey": user,
            "wrapAndUnwrapSol": true,
        });
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("request swap transaction")?
            .error_for_status()
            .context("swap transaction rejected")?;
        let parsed: SwapResponse = response.json().await.context("decode swap response")?;
        Ok(parsed.swap_transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_response_decodes_jupiter_shape() {
        let raw = serde_json::json!({
            "outAmount": "1995000000000",
            "routePlan": [
                {"swapInfo": {"label": "Whirlpool"}},
                {"swapInfo": {"label": "Raydium"}}
            ]
        });
        let parsed: QuoteResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.out_amount, "1995000000000");
        assert_eq!(parsed.route_plan.len(), 2);
    }
}
