use anchor_lang::prelude::*;

use crate::events::DepositAccountCreated;
use crate::logging::debug_log;
use crate::state::DepositStatus;
use crate::CreateDepositAccount;

pub fn handler(ctx: Context<CreateDepositAccount>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let deposit = &mut ctx.accounts.deposit;
    deposit.owner = ctx.accounts.user.key();
    deposit.xmr_deposit_address = String::new();
    deposit.total_deposited = 0;
    deposit.status = DepositStatus::Pending;
    deposit.bump = ctx.bumps.deposit;
    deposit.created_at = now;

    emit!(DepositAccountCreated {
        deposit: deposit.key(),
        owner: deposit.owner,
        timestamp: now,
    });
    debug_log("deposit account created");
    Ok(())
}
