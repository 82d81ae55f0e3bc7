use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::WithdrawalSending;
use crate::logging::debug_log;
use crate::state::WithdrawalStatus;
use crate::MarkWithdrawalSending;

pub fn handler(ctx: Context<MarkWithdrawalSending>) -> Result<()> {
    let withdrawal = &mut ctx.accounts.withdrawal;
    require!(
        withdrawal.status.can_mark_sending(),
        ErrorCode::InvalidWithdrawalStatus
    );

    withdrawal.status = WithdrawalStatus::Sending;

    emit!(WithdrawalSending {
        withdrawal: withdrawal.key(),
        user: withdrawal.user,
        amount: withdrawal.amount,
    });
    debug_log("withdrawal marked sending");
    Ok(())
}
