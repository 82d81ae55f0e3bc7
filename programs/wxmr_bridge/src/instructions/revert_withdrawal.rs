use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo};

use crate::errors::ErrorCode;
use crate::events::WithdrawReverted;
use crate::logging::debug_log;
use crate::state::BridgeConfig;
use crate::RevertWithdrawal;

pub fn handler(ctx: Context<RevertWithdrawal>, reason: String) -> Result<()> {
    let withdrawal = &ctx.accounts.withdrawal;
    require!(
        withdrawal.status.can_revert(),
        ErrorCode::InvalidWithdrawalStatus
    );

    let amount = withdrawal.amount;

    // Undo the burn from request_withdrawal.
    let config_bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[BridgeConfig::SEED, &[config_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.wxmr_mint.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(WithdrawReverted {
        withdrawal: withdrawal.key(),
        user: withdrawal.user,
        amount,
        reason,
    });
    debug_log("withdrawal reverted");
    Ok(())
}
