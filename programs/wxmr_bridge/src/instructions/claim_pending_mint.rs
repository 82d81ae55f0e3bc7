use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Transfer};

use crate::errors::ErrorCode;
use crate::events::PendingMintClaimed;
use crate::logging::debug_log;
use crate::state::DepositRecord;
use crate::ClaimPendingMint;

pub fn handler(ctx: Context<ClaimPendingMint>) -> Result<()> {
    let amount = ctx.accounts.pending_token_account.amount;
    require!(amount > 0, ErrorCode::NothingToClaim);

    let owner_key = ctx.accounts.owner.key();
    let deposit_bump = ctx.accounts.deposit.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[
        DepositRecord::SEED_PREFIX,
        owner_key.as_ref(),
        &[deposit_bump],
    ]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.pending_token_account.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: ctx.accounts.deposit.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    // The escrow account is empty now; return its rent to the authority
    // that paid for it in mint_deposit.
    token::close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.pending_token_account.to_account_info(),
            destination: ctx.accounts.authority.to_account_info(),
            authority: ctx.accounts.deposit.to_account_info(),
        },
        signer_seeds,
    ))?;

    emit!(PendingMintClaimed {
        deposit: ctx.accounts.deposit.key(),
        owner: owner_key,
        amount,
    });
    debug_log("pending mint claimed");
    Ok(())
}
