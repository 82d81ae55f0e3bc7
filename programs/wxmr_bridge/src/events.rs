use anchor_lang::prelude::*;

use crate::state::SwapDirection;

#[event]
pub struct DepositAccountCreated {
    pub deposit: Pubkey,
    pub owner: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct DepositAddressAssigned {
    pub deposit: Pubkey,
    pub xmr_address: String,
}

#[event]
pub struct DepositMinted {
    pub deposit: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub total_deposited: u64,
    /// True when the amount went to the escrow account instead of the
    /// owner's token account.
    pub escrowed: bool,
}

#[event]
pub struct PendingMintClaimed {
    pub deposit: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DepositAccountClosed {
    pub deposit: Pubkey,
    pub owner: Pubkey,
    pub total_deposited: u64,
}

#[event]
pub struct WithdrawRequested {
    pub withdrawal: Pubkey,
    pub user: Pubkey,
    pub nonce: u64,
    pub amount: u64,
    pub xmr_address: String,
    pub timestamp: i64,
}

#[event]
pub struct WithdrawalSending {
    pub withdrawal: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WithdrawCompleted {
    pub withdrawal: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub xmr_address: String,
    pub xmr_tx_hash: String,
    pub xmr_tx_key: String,
}

#[event]
pub struct WithdrawReverted {
    pub withdrawal: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub reason: String,
}

#[event]
pub struct AuditRecordCreated {
    pub epoch: u64,
    pub timestamp: i64,
    pub circulating_supply: u64,
    pub spendable_balance: u64,
    pub unconfirmed_balance: u64,
    pub data_len: u32,
}

#[event]
pub struct AuditDataExtended {
    pub epoch: u64,
    pub added_len: u32,
    pub total_len: u32,
}

#[event]
pub struct AmmInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub buy_price: u64,
    pub sell_price: u64,
}

#[event]
pub struct PriceUpdated {
    pub pool: Pubkey,
    pub old_buy_price: u64,
    pub old_sell_price: u64,
    pub new_buy_price: u64,
    pub new_sell_price: u64,
}

#[event]
pub struct Swap {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub direction: SwapDirection,
    pub wxmr_amount: u64,
    pub usdc_amount: u64,
    pub price: u64,
}

#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub wxmr_amount: u64,
    pub usdc_amount: u64,
}

#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub wxmr_amount: u64,
    pub usdc_amount: u64,
}

#[event]
pub struct AmmEnabledChanged {
    pub pool: Pubkey,
    pub enabled: bool,
}
