use anchor_lang::prelude::*;

use crate::logging::debug_log;
use crate::Initialize;

pub fn handler(ctx: Context<Initialize>, min_withdrawal: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.wxmr_mint = ctx.accounts.wxmr_mint.key();
    config.total_deposits = 0;
    config.total_withdrawals = 0;
    config.min_withdrawal = min_withdrawal;
    config.bump = ctx.bumps.config;

    debug_log("bridge config initialized");
    Ok(())
}
