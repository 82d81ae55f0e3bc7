use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::AmmInitialized;
use crate::logging::debug_log;
use crate::InitializeAmm;

pub fn handler(
    ctx: Context<InitializeAmm>,
    initial_buy_price: u64,
    initial_sell_price: u64,
) -> Result<()> {
    require!(
        initial_buy_price > 0 && initial_sell_price > 0,
        ErrorCode::InvalidPrice
    );
    require!(
        initial_buy_price >= initial_sell_price,
        ErrorCode::InvalidSpread
    );

    let pool = &mut ctx.accounts.pool;
    pool.authority = ctx.accounts.authority.key();
    pool.wxmr_mint = ctx.accounts.wxmr_mint.key();
    pool.usdc_mint = ctx.accounts.usdc_mint.key();
    pool.pool_wxmr = ctx.accounts.pool_wxmr.key();
    pool.pool_usdc = ctx.accounts.pool_usdc.key();
    pool.buy_price = initial_buy_price;
    pool.sell_price = initial_sell_price;
    pool.last_price_update = Clock::get()?.unix_timestamp;
    pool.enabled = true;
    pool.bump = ctx.bumps.pool;
    pool.total_wxmr_volume = 0;
    pool.total_usdc_volume = 0;

    emit!(AmmInitialized {
        pool: pool.key(),
        authority: pool.authority,
        buy_price: initial_buy_price,
        sell_price: initial_sell_price,
    });
    debug_log("amm initialized");
    Ok(())
}
