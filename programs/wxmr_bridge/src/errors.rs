use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid wXMR mint (must match bridge config)")]
    InvalidMint,
    #[msg("Invalid XMR address")]
    InvalidXmrAddress,
    #[msg("Amount too small")]
    AmountTooSmall,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Deposit address already assigned")]
    AddressAlreadyAssigned,
    #[msg("Deposit account is not in the required state")]
    InvalidDepositStatus,
    #[msg("Withdrawal record is not in the required state")]
    InvalidWithdrawalStatus,
    #[msg("No pending mint to claim")]
    NothingToClaim,
    #[msg("Invalid completion proof")]
    InvalidProof,
    #[msg("Invalid price")]
    InvalidPrice,
    #[msg("Invalid spread: buy price must be >= sell price")]
    InvalidSpread,
    #[msg("Insufficient liquidity in pool")]
    InsufficientLiquidity,
    #[msg("Insufficient balance")]
    InsufficientBalance,
    #[msg("Trading is disabled")]
    TradingDisabled,
    #[msg("Price is stale (not updated within 20 seconds)")]
    PriceStale,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Token account owner mismatch")]
    InvalidOwner,
}
