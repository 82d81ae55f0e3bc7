use anchor_lang::prelude::*;

use crate::events::AmmEnabledChanged;
use crate::logging::debug_log;
use crate::SetAmmEnabled;

pub fn handler(ctx: Context<SetAmmEnabled>, enabled: bool) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.enabled = enabled;

    emit!(AmmEnabledChanged {
        pool: pool.key(),
        enabled,
    });
    debug_log("amm enabled flag changed");
    Ok(())
}
