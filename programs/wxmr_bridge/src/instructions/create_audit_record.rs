use anchor_lang::prelude::*;

use crate::events::AuditRecordCreated;
use crate::logging::debug_log;
use crate::CreateAuditRecord;

pub fn handler(
    ctx: Context<CreateAuditRecord>,
    epoch: u64,
    circulating_supply: u64,
    spendable_balance: u64,
    unconfirmed_balance: u64,
    data: String,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let audit = &mut ctx.accounts.audit;
    audit.epoch = epoch;
    audit.timestamp = now;
    audit.circulating_supply = circulating_supply;
    audit.spendable_balance = spendable_balance;
    audit.unconfirmed_balance = unconfirmed_balance;
    audit.data = data;
    audit.bump = ctx.bumps.audit;

    emit!(AuditRecordCreated {
        epoch,
        timestamp: now,
        circulating_supply,
        spendable_balance,
        unconfirmed_balance,
        data_len: audit.data.len() as u32,
    });
    debug_log("audit record created");
    Ok(())
}
