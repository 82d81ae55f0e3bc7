use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn};

use crate::errors::ErrorCode;
use crate::events::WithdrawRequested;
use crate::logging::debug_log;
use crate::state::{WithdrawalStatus, MAX_XMR_ADDRESS_LEN};
use crate::validation::is_valid_xmr_address;
use crate::RequestWithdrawal;

pub fn handler(
    ctx: Context<RequestWithdrawal>,
    nonce: u64,
    amount: u64,
    xmr_address: String,
) -> Result<()> {
    require!(
        amount >= ctx.accounts.config.min_withdrawal,
        ErrorCode::AmountTooSmall
    );
    require!(
        xmr_address.len() <= MAX_XMR_ADDRESS_LEN,
        ErrorCode::InvalidXmrAddress
    );
    require!(
        is_valid_xmr_address(&xmr_address),
        ErrorCode::InvalidXmrAddress
    );
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        ErrorCode::InsufficientBalance
    );

    // Burn first; the record only exists once the wXMR is gone.
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.wxmr_mint.to_account_info(),
                from: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let withdrawal = &mut ctx.accounts.withdrawal;
    withdrawal.user = ctx.accounts.user.key();
    withdrawal.nonce = nonce;
    withdrawal.amount = amount;
    withdrawal.xmr_address = xmr_address.clone();
    withdrawal.status = WithdrawalStatus::Pending;
    withdrawal.bump = ctx.bumps.withdrawal;
    withdrawal.created_at = now;
    withdrawal.xmr_tx_hash = String::new();
    withdrawal.xmr_tx_key = String::new();

    emit!(WithdrawRequested {
        withdrawal: withdrawal.key(),
        user: withdrawal.user,
        nonce,
        amount,
        xmr_address,
        timestamp: now,
    });
    debug_log("withdrawal requested");
    Ok(())
}
