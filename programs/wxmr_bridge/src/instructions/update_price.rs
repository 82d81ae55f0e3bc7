use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::PriceUpdated;
use crate::logging::debug_log;
use crate::UpdatePrice;

pub fn handler(ctx: Context<UpdatePrice>, new_buy_price: u64, new_sell_price: u64) -> Result<()> {
    require!(
        new_buy_price > 0 && new_sell_price > 0,
        ErrorCode::InvalidPrice
    );
    require!(new_buy_price >= new_sell_price, ErrorCode::InvalidSpread);

    let pool = &mut ctx.accounts.pool;
    let old_buy_price = pool.buy_price;
    let old_sell_price = pool.sell_price;

    pool.buy_price = new_buy_price;
    pool.sell_price = new_sell_price;
    pool.last_price_update = Clock::get()?.unix_timestamp;

    emit!(PriceUpdated {
        pool: pool.key(),
        old_buy_price,
        old_sell_price,
        new_buy_price,
        new_sell_price,
    });
    debug_log("price updated");
    Ok(())
}
