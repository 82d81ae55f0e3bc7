use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::WithdrawCompleted;
use crate::logging::debug_log;
use crate::state::MAX_TX_PROOF_LEN;
use crate::CompleteWithdrawal;

pub fn handler(
    ctx: Context<CompleteWithdrawal>,
    xmr_tx_hash: String,
    xmr_tx_key: String,
) -> Result<()> {
    let withdrawal = &mut ctx.accounts.withdrawal;
    require!(
        withdrawal.status.can_complete(),
        ErrorCode::InvalidWithdrawalStatus
    );
    require!(
        !xmr_tx_hash.is_empty() && xmr_tx_hash.len() <= MAX_TX_PROOF_LEN,
        ErrorCode::InvalidProof
    );
    require!(
        !xmr_tx_key.is_empty() && xmr_tx_key.len() <= MAX_TX_PROOF_LEN,
        ErrorCode::InvalidProof
    );

    let config = &mut ctx.accounts.config;
    config.total_withdrawals = config
        .total_withdrawals
        .checked_add(withdrawal.amount)
        .ok_or(ErrorCode::Overflow)?;

    // The record closes after this instruction (rent back to the user);
    // the event is the durable completion proof.
    emit!(WithdrawCompleted {
        withdrawal: withdrawal.key(),
        user: withdrawal.user,
        amount: withdrawal.amount,
        xmr_address: withdrawal.xmr_address.clone(),
        xmr_tx_hash,
        xmr_tx_key,
    });
    debug_log("withdrawal completed");
    Ok(())
}
