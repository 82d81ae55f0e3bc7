use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::ErrorCode;
use crate::events::LiquidityAdded;
use crate::logging::debug_log;
use crate::ManageLiquidity;

pub fn handler(ctx: Context<ManageLiquidity>, wxmr_amount: u64, usdc_amount: u64) -> Result<()> {
    require!(
        wxmr_amount > 0 || usdc_amount > 0,
        ErrorCode::InvalidAmount
    );

    if wxmr_amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.authority_wxmr.to_account_info(),
                    to: ctx.accounts.pool_wxmr.to_account_info(),
                    authority: ctx.accounts.authority.to_account_info(),
                },
            ),
            wxmr_amount,
        )?;
    }
    if usdc_amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.authority_usdc.to_account_info(),
                    to: ctx.accounts.pool_usdc.to_account_info(),
                    authority: ctx.accounts.authority.to_account_info(),
                },
            ),
            usdc_amount,
        )?;
    }

    emit!(LiquidityAdded {
        pool: ctx.accounts.pool.key(),
        wxmr_amount,
        usdc_amount,
    });
    debug_log("liquidity added");
    Ok(())
}
