use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::ErrorCode;
use crate::events::AuditDataExtended;
use crate::logging::debug_log;
use crate::state::AuditRecord;
use crate::ExtendAuditData;

pub fn handler(ctx: Context<ExtendAuditData>, epoch: u64, additional_data: String) -> Result<()> {
    require!(!additional_data.is_empty(), ErrorCode::InvalidAmount);

    let audit_info = ctx.accounts.audit.to_account_info();
    let new_data_len = ctx
        .accounts
        .audit
        .data
        .len()
        .checked_add(additional_data.len())
        .ok_or(ErrorCode::Overflow)?;
    let new_space = AuditRecord::space(new_data_len);

    // Grow the account and top up rent exemption before writing.
    let rent = Rent::get()?;
    let required = rent.minimum_balance(new_space);
    let current = audit_info.lamports();
    if required > current {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.authority.to_account_info(),
                    to: audit_info.clone(),
                },
            ),
            required - current,
        )?;
    }
    audit_info.realloc(new_space, false)?;

    let audit = &mut ctx.accounts.audit;
    audit.data.push_str(&additional_data);

    emit!(AuditDataExtended {
        epoch,
        added_len: additional_data.len() as u32,
        total_len: audit.data.len() as u32,
    });
    debug_log("audit data extended");
    Ok(())
}
