use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, MintTo};

use crate::errors::ErrorCode;
use crate::events::DepositMinted;
use crate::logging::debug_log;
use crate::state::{BridgeConfig, MIN_DEPOSIT};
use crate::MintDeposit;

pub fn handler(ctx: Context<MintDeposit>, amount: u64) -> Result<()> {
    require!(amount >= MIN_DEPOSIT, ErrorCode::AmountTooSmall);
    require!(
        ctx.accounts.deposit.status.can_receive_mint(),
        ErrorCode::InvalidDepositStatus
    );

    // The owner's ATA may not exist. When it does, mint straight to it;
    // otherwise mint to the escrow account owned by the deposit PDA and let
    // the owner claim later.
    let expected_ata = get_associated_token_address(
        &ctx.accounts.owner.key(),
        &ctx.accounts.wxmr_mint.key(),
    );
    require_keys_eq!(
        ctx.accounts.owner_token_account.key(),
        expected_ata,
        ErrorCode::InvalidMint
    );
    let owner_ata_exists = !ctx.accounts.owner_token_account.data_is_empty();

    let destination = if owner_ata_exists {
        ctx.accounts.owner_token_account.to_account_info()
    } else {
        ctx.accounts.pending_token_account.to_account_info()
    };

    let config_bump = ctx.accounts.config.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[BridgeConfig::SEED, &[config_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.wxmr_mint.to_account_info(),
                to: destination,
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    let deposit = &mut ctx.accounts.deposit;
    deposit.total_deposited = deposit
        .total_deposited
        .checked_add(amount)
        .ok_or(ErrorCode::Overflow)?;

    let config = &mut ctx.accounts.config;
    config.total_deposits = config
        .total_deposits
        .checked_add(amount)
        .ok_or(ErrorCode::Overflow)?;

    emit!(DepositMinted {
        deposit: deposit.key(),
        owner: deposit.owner,
        amount,
        total_deposited: deposit.total_deposited,
        escrowed: !owner_ata_exists,
    });
    debug_log("deposit minted");
    Ok(())
}
