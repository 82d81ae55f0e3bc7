use anchor_lang::prelude::*;
use anchor_lang::AccountsClose;

use crate::errors::ErrorCode;
use crate::events::DepositAccountClosed;
use crate::logging::debug_log;
use crate::CloseDepositAccount;

pub fn handler(ctx: Context<CloseDepositAccount>) -> Result<()> {
    let deposit = &ctx.accounts.deposit;
    require!(deposit.status.can_close(), ErrorCode::InvalidDepositStatus);

    emit!(DepositAccountClosed {
        deposit: deposit.key(),
        owner: deposit.owner,
        total_deposited: deposit.total_deposited,
    });

    // Rent goes to the authority once a subaddress was burned on this
    // account; an address-less account refunds the user in full.
    let recipient = if deposit.xmr_deposit_address.is_empty() {
        ctx.accounts.user.to_account_info()
    } else {
        ctx.accounts.authority.to_account_info()
    };
    ctx.accounts.deposit.close(recipient)?;

    debug_log("deposit account closed");
    Ok(())
}
