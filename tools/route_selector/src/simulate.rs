//! Pre-flight simulation of aggregator swap transactions.
//!
//! An aggregator quote is only trusted after its transaction simulates
//! cleanly; a failing simulation downgrades the whole route to "no route"
//! rather than risking a revert on-chain.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::transaction::VersionedTransaction;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimOutcome {
    Success,
    Failure { reason: String },
}

impl SimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[async_trait]
pub trait RouteSimulator: Send + Sync {
    async fn simulate(&self, tx_base64: &str) -> Result<SimOutcome>;
}

pub struct RpcSimulator {
    rpc: RpcClient,
}

impl RpcSimulator {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new(rpc_url.to_string()),
        }
    }
}

#[async_trait]
impl RouteSimulator for RpcSimulator {
    async fn simulate(&self, tx_base64: &str) -> Result<SimOutcome> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(tx_base64)
            .context("decode swap transaction")?;
        let tx: VersionedTransaction =
            bincode::deserialize(&bytes).context("deserialize swap transaction")?;

        let result = match self.rpc.simulate_transaction(&tx).await {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "simulation rpc failed");
                return Ok(SimOutcome::Failure {
                    reason: err.to_string(),
                });
            }
        };
        match result.value.err {
            None => Ok(SimOutcome::Success),
            Some(err) => Ok(SimOutcome::Failure {
                reason: format!("{err:?}"),
            }),
        }
    }
}
