use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::ErrorCode;
use crate::events::Swap;
use crate::logging::debug_log;
use crate::math::usdc_out_for_wxmr;
use crate::state::{AmmPool, SwapDirection};
use crate::SwapTokens;

pub fn handler(ctx: Context<SwapTokens>, wxmr_amount: u64) -> Result<()> {
    require!(wxmr_amount > 0, ErrorCode::InvalidAmount);
    let pool = &ctx.accounts.pool;
    require!(pool.enabled, ErrorCode::TradingDisabled);
    let now = Clock::get()?.unix_timestamp;
    require!(!pool.is_price_stale(now), ErrorCode::PriceStale);

    let usdc_out = usdc_out_for_wxmr(wxmr_amount, pool.sell_price)?;
    require!(usdc_out > 0, ErrorCode::AmountTooSmall);
    require!(
        ctx.accounts.pool_usdc.amount >= usdc_out,
        ErrorCode::InsufficientLiquidity
    );
    require!(
        ctx.accounts.user_wxmr.amount >= wxmr_amount,
        ErrorCode::InsufficientBalance
    );

    // User pays wXMR in.
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_wxmr.to_account_info(),
                to: ctx.accounts.pool_wxmr.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        wxmr_amount,
    )?;

    // Pool pays USDC out, signed by the pool PDA.
    let pool_bump = ctx.accounts.pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[AmmPool::SEED, &[pool_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.pool_usdc.to_account_info(),
                to: ctx.accounts.user_usdc.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        usdc_out,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.total_wxmr_volume = pool
        .total_wxmr_volume
        .checked_add(wxmr_amount)
        .ok_or(ErrorCode::Overflow)?;
    pool.total_usdc_volume = pool
        .total_usdc_volume
        .checked_add(usdc_out)
        .ok_or(ErrorCode::Overflow)?;

    emit!(Swap {
        pool: pool.key(),
        user: ctx.accounts.user.key(),
        direction: SwapDirection::Sell,
        wxmr_amount,
        usdc_amount: usdc_out,
        price: pool.sell_price,
    });
    debug_log("sell executed");
    Ok(())
}
