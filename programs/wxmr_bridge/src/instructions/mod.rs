pub mod add_liquidity;
pub mod assign_deposit_address;
pub mod buy_wxmr;
pub mod claim_pending_mint;
pub mod close_deposit_account;
pub mod complete_withdrawal;
pub mod create_audit_record;
pub mod create_deposit_account;
pub mod extend_audit_data;
pub mod initialize;
pub mod initialize_amm;
pub mod mark_withdrawal_sending;
pub mod mint_deposit;
pub mod remove_liquidity;
pub mod request_withdrawal;
pub mod revert_withdrawal;
pub mod sell_wxmr;
pub mod set_amm_enabled;
pub mod update_price;
