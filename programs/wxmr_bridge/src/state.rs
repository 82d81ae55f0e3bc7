use anchor_lang::prelude::*;

/// Staleness gate for oracle-fed prices. Swaps are rejected when the last
/// price push is older than this.
pub const PRICE_STALENESS_SECS: i64 = 20;

/// Minimum deposit the watcher is allowed to mint: 0.01 XMR in piconero.
pub const MIN_DEPOSIT: u64 = 10_000_000_000;

/// Default minimum withdrawal, also 0.01 XMR. The effective value is a
/// config field because earlier deployments used 0.001.
pub const DEFAULT_MIN_WITHDRAWAL: u64 = 10_000_000_000;

/// Longest accepted XMR address (integrated addresses are 106 chars).
pub const MAX_XMR_ADDRESS_LEN: usize = 106;

/// Monero tx hashes and tx keys are 32 bytes hex-encoded.
pub const MAX_TX_PROOF_LEN: usize = 64;

#[account]
pub struct BridgeConfig {
    pub authority: Pubkey,
    pub wxmr_mint: Pubkey,
    /// Cumulative piconero ever minted through the bridge.
    pub total_deposits: u64,
    /// Cumulative piconero ever burned and completed.
    pub total_withdrawals: u64,
    pub min_withdrawal: u64,
    pub bump: u8,
}

impl BridgeConfig {
    pub const SIZE: usize = 32 + 32 + 8 + 8 + 8 + 1;
    pub const LEN: usize = 8 + Self::SIZE;
    pub const SEED: &'static [u8] = b"config";
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DepositStatus {
    /// Account created, no XMR subaddress assigned yet.
    Pending,
    /// Subaddress assigned; can receive deposits indefinitely.
    Active,
    Closed,
}

impl DepositStatus {
    pub fn can_assign_address(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn can_receive_mint(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn can_close(&self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

#[account]
pub struct DepositRecord {
    pub owner: Pubkey,
    /// Empty until the authority assigns a subaddress; assigned at most once.
    pub xmr_deposit_address: String,
    pub total_deposited: u64,
    pub status: DepositStatus,
    pub bump: u8,
    pub created_at: i64,
}

impl DepositRecord {
    pub const SIZE: usize = 32 + (4 + MAX_XMR_ADDRESS_LEN) + 8 + 1 + 1 + 8;
    pub const LEN: usize = 8 + Self::SIZE;
    pub const SEED_PREFIX: &'static [u8] = b"deposit";
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum WithdrawalStatus {
    Pending,
    /// Point of no return: the XMR transfer may already be broadcast.
    Sending,
    Completed,
}

impl WithdrawalStatus {
    pub fn can_mark_sending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Pending is allowed here for the legacy direct-complete path.
    pub fn can_complete(&self) -> bool {
        matches!(self, Self::Pending | Self::Sending)
    }

    pub fn can_revert(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

#[account]
pub struct WithdrawalRecord {
    pub user: Pubkey,
    pub nonce: u64,
    pub amount: u64,
    pub xmr_address: String,
    pub status: WithdrawalStatus,
    pub bump: u8,
    pub created_at: i64,
    /// Completion proof, attached by complete_withdrawal.
    pub xmr_tx_hash: String,
    pub xmr_tx_key: String,
}

impl WithdrawalRecord {
    pub const SIZE: usize = 32
        + 8
        + 8
        + (4 + MAX_XMR_ADDRESS_LEN)
        + 1
        + 1
        + 8
        + (4 + MAX_TX_PROOF_LEN)
        + (4 + MAX_TX_PROOF_LEN);
    pub const LEN: usize = 8 + Self::SIZE;
    pub const SEED_PREFIX: &'static [u8] = b"withdrawal";
}

/// Reserve-proof snapshot for one consolidation epoch. The data payload is
/// append-only: extend_audit_data grows the account, nothing ever shrinks it.
#[account]
pub struct AuditRecord {
    pub epoch: u64,
    pub timestamp: i64,
    pub circulating_supply: u64,
    pub spendable_balance: u64,
    pub unconfirmed_balance: u64,
    pub data: String,
    pub bump: u8,
}

impl AuditRecord {
    pub const BASE_SIZE: usize = 8 + 8 + 8 + 8 + 8 + 4 + 1;
    pub const SEED_PREFIX: &'static [u8] = b"audit";

    pub fn space(data_len: usize) -> usize {
        8 + Self::BASE_SIZE + data_len
    }
}

#[account]
pub struct AmmPool {
    pub authority: Pubkey,
    pub wxmr_mint: Pubkey,
    pub usdc_mint: Pubkey,
    pub pool_wxmr: Pubkey,
    pub pool_usdc: Pubkey,
    /// USDC atomic units (6 decimals) per 1 wXMR (1e12 piconero).
    pub buy_price: u64,
    /// Always <= buy_price; the gap is the pool spread.
    pub sell_price: u64,
    pub last_price_update: i64,
    pub enabled: bool,
    pub bump: u8,
    pub total_wxmr_volume: u64,
    pub total_usdc_volume: u64,
}

impl AmmPool {
    pub const SIZE: usize = 32 * 5 + 8 + 8 + 8 + 1 + 1 + 8 + 8;
    pub const LEN: usize = 8 + Self::SIZE;
    pub const SEED: &'static [u8] = b"amm_pool";
    pub const WXMR_VAULT_SEED: &'static [u8] = b"amm_wxmr";
    pub const USDC_VAULT_SEED: &'static [u8] = b"amm_usdc";

    pub fn is_price_stale(&self, now: i64) -> bool {
        now.saturating_sub(self.last_price_update) > PRICE_STALENESS_SECS
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapDirection {
    Buy,
    Sell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_status_only_walks_pending_active_closed() {
        assert!(DepositStatus::Pending.can_assign_address());
        assert!(!DepositStatus::Active.can_assign_address());
        assert!(!DepositStatus::Closed.can_assign_address());

        assert!(!DepositStatus::Pending.can_receive_mint());
        assert!(DepositStatus::Active.can_receive_mint());
        assert!(!DepositStatus::Closed.can_receive_mint());

        assert!(DepositStatus::Pending.can_close());
        assert!(DepositStatus::Active.can_close());
        assert!(!DepositStatus::Closed.can_close());
    }

    #[test]
    fn withdrawal_cannot_revert_after_sending() {
        assert!(WithdrawalStatus::Pending.can_revert());
        assert!(!WithdrawalStatus::Sending.can_revert());
        assert!(!WithdrawalStatus::Completed.can_revert());
    }

    #[test]
    fn withdrawal_completes_from_pending_or_sending() {
        assert!(WithdrawalStatus::Pending.can_complete());
        assert!(WithdrawalStatus::Sending.can_complete());
        assert!(!WithdrawalStatus::Completed.can_complete());

        assert!(WithdrawalStatus::Pending.can_mark_sending());
        assert!(!WithdrawalStatus::Sending.can_mark_sending());
        assert!(!WithdrawalStatus::Completed.can_mark_sending());
    }

    #[test]
    fn price_staleness_uses_twenty_second_window() {
        let pool = AmmPool {
            authority: Pubkey::default(),
            wxmr_mint: Pubkey::default(),
            usdc_mint: Pubkey::default(),
            pool_wxmr: Pubkey::default(),
            pool_usdc: Pubkey::default(),
            buy_price: 1,
            sell_price: 1,
            last_price_update: 1_000,
            enabled: true,
            bump: 0,
            total_wxmr_volume: 0,
            total_usdc_volume: 0,
        };
        assert!(!pool.is_price_stale(1_000));
        assert!(!pool.is_price_stale(1_020));
        assert!(pool.is_price_stale(1_021));
    }
}
