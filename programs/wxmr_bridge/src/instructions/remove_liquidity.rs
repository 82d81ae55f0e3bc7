use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::ErrorCode;
use crate::events::LiquidityRemoved;
use crate::logging::debug_log;
use crate::state::AmmPool;
use crate::ManageLiquidity;

pub fn handler(ctx: Context<ManageLiquidity>, wxmr_amount: u64, usdc_amount: u64) -> Result<()> {
    require!(
        wxmr_amount > 0 || usdc_amount > 0,
        ErrorCode::InvalidAmount
    );
    require!(
        ctx.accounts.pool_wxmr.amount >= wxmr_amount,
        ErrorCode::InsufficientLiquidity
    );
    require!(
        ctx.accounts.pool_usdc.amount >= usdc_amount,
        ErrorCode::InsufficientLiquidity
    );

    let pool_bump = ctx.accounts.pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[AmmPool::SEED, &[pool_bump]]];

    if wxmr_amount > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_wxmr.to_account_info(),
                    to: ctx.accounts.authority_wxmr.to_account_info(),
                    authority: ctx.accounts.pool.to_account_info(),
                },
                signer_seeds,
            ),
            wxmr_amount,
        )?;
    }
    if usdc_amount > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_usdc.to_account_info(),
                    to: ctx.accounts.authority_usdc.to_account_info(),
                    authority: ctx.accounts.pool.to_account_info(),
                },
                signer_seeds,
            ),
            usdc_amount,
        )?;
    }

    emit!(LiquidityRemoved {
        pool: ctx.accounts.pool.key(),
        wxmr_amount,
        usdc_amount,
    });
    debug_log("liquidity removed");
    Ok(())
}
