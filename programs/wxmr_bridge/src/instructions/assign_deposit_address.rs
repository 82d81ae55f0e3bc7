use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::DepositAddressAssigned;
use crate::logging::debug_log;
use crate::state::{DepositStatus, MAX_XMR_ADDRESS_LEN};
use crate::validation::is_valid_xmr_address;
use crate::AssignDepositAddress;

pub fn handler(ctx: Context<AssignDepositAddress>, xmr_address: String) -> Result<()> {
    let deposit = &mut ctx.accounts.deposit;

    require!(
        deposit.status.can_assign_address(),
        ErrorCode::InvalidDepositStatus
    );
    require!(
        deposit.xmr_deposit_address.is_empty(),
        ErrorCode::AddressAlreadyAssigned
    );
    require!(
        xmr_address.len() <= MAX_XMR_ADDRESS_LEN,
        ErrorCode::InvalidXmrAddress
    );
    require!(
        is_valid_xmr_address(&xmr_address),
        ErrorCode::InvalidXmrAddress
    );

    deposit.xmr_deposit_address = xmr_address.clone();
    deposit.status = DepositStatus::Active;

    emit!(DepositAddressAssigned {
        deposit: deposit.key(),
        xmr_address,
    });
    debug_log("deposit address assigned");
    Ok(())
}
