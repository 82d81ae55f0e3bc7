//! Bridge pool quoting.
//!
//! The pool is fixed-price: output is a pure function of the on-chain price
//! and the input amount, so a quote is an account fetch plus integer math.
//! The same math the program uses is linked in directly so the preview can
//! never drift from what the swap would actually pay out.

use std::time::{SystemTime, UNIX_EPOCH};

use anchor_lang::AccountDeserialize;
use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;

use wxmr_bridge::math::{usdc_out_for_wxmr, wxmr_out_for_usdc};
use wxmr_bridge::state::AmmPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// USDC in, wXMR out.
    Buy,
    /// wXMR in, USDC out.
    Sell,
}

/// Point-in-time view of the pool, enough to quote without another fetch.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub buy_price: u64,
    pub sell_price: u64,
    pub last_price_update: i64,
    pub enabled: bool,
    pub wxmr_reserve: u64,
    pub usdc_reserve: u64,
}

impl PoolSnapshot {
    pub fn is_price_stale(&self, now: i64) -> bool {
        now.saturating_sub(self.last_price_update) > wxmr_bridge::state::PRICE_STALENESS_SECS
    }

    /// Output the pool would pay right now, or None when it cannot serve
    /// the trade (disabled, stale price, dust output, thin reserves).
    pub fn preview(&self, direction: Direction, amount_in: u64, now: i64) -> Option<u64> {
        if !self.enabled || self.is_price_stale(now) || amount_in == 0 {
            return None;
        }
        let (out, reserve) = match direction {
            Direction::Buy => (
                wxmr_out_for_usdc(amount_in, self.buy_price).ok()?,
                self.wxmr_reserve,
            ),
            Direction::Sell => (
                usdc_out_for_wxmr(amount_in, self.sell_price).ok()?,
                self.usdc_reserve,
            ),
        };
        if out == 0 || out > reserve {
            return None;
        }
        Some(out)
    }
}

#[async_trait]
pub trait PoolSource: Send + Sync {
    async fn snapshot(&self) -> Result<PoolSnapshot>;
}

/// Fetches the pool account and its two vaults over RPC.
pub struct RpcPoolSource {
    rpc: RpcClient,
}

impl RpcPoolSource {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new(rpc_url.to_string()),
        }
    }

    pub fn pool_address() -> Pubkey {
        Pubkey::find_program_address(&[AmmPool::SEED], &wxmr_bridge::ID).0
    }
}

#[async_trait]
impl PoolSource for RpcPoolSource {
    async fn snapshot(&self) -> Result<PoolSnapshot> {
        let pool_key = Self::pool_address();
        let account = self
            .rpc
            .get_account(&pool_key)
            .await
            .context("fetch pool account")?;
        let pool = AmmPool::try_deserialize(&mut account.data.as_slice())
            .context("decode pool account")?;

        let wxmr_vault = self
            .rpc
            .get_account(&pool.pool_wxmr)
            .await
            .context("fetch pool wXMR vault")?;
        let usdc_vault = self
            .rpc
            .get_account(&pool.pool_usdc)
            .await
            .context("fetch pool USDC vault")?;
        let wxmr_reserve = spl_token_amount(&wxmr_vault.data)?;
        let usdc_reserve = spl_token_amount(&usdc_vault.data)?;

        Ok(PoolSnapshot {
            buy_price: pool.buy_price,
            sell_price: pool.sell_price,
            last_price_update: pool.last_price_update,
            enabled: pool.enabled,
            wxmr_reserve,
            usdc_reserve,
        })
    }
}

fn spl_token_amount(data: &[u8]) -> Result<u64> {
    let account = spl_token::state::Account::unpack(data).context("decode token account")?;
    Ok(account.amount)
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot {
            buy_price: 150_000_000,
            sell_price: 148_000_000,
            last_price_update: 1_000,
            enabled: true,
            wxmr_reserve: 100_000_000_000_000,
            usdc_reserve: 10_000_000_000,
        }
    }

    #[test]
    fn preview_buy_uses_buy_price() {
        let out = snapshot().preview(Direction::Buy, 300_000_000, 1_010).unwrap();
        assert_eq!(out, 2_000_000_000_000);
    }

    #[test]
    fn preview_sell_uses_sell_price() {
        let out = snapshot()
            .preview(Direction::Sell, 2_000_000_000_000, 1_010)
            .unwrap();
        assert_eq!(out, 296_000_000);
    }

    #[test]
    fn stale_price_yields_no_quote() {
        assert!(snapshot().preview(Direction::Buy, 300_000_000, 1_021).is_none());
    }

    #[test]
    fn disabled_pool_yields_no_quote() {
        let mut snap = snapshot();
        snap.enabled = false;
        assert!(snap.preview(Direction::Buy, 300_000_000, 1_010).is_none());
    }

    #[test]
    fn output_beyond_reserves_yields_no_quote() {
        let mut snap = snapshot();
        snap.wxmr_reserve = 1_000_000_000_000;
        assert!(snap.preview(Direction::Buy, 300_000_000, 1_010).is_none());
    }

    #[test]
    fn dust_output_yields_no_quote() {
        assert!(snapshot().preview(Direction::Sell, 1, 1_010).is_none());
    }
}
