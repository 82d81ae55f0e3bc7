use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

pub mod errors;
pub mod events;
pub mod instructions;
pub mod logging;
pub mod math;
pub mod state;
pub mod validation;

use crate::errors::ErrorCode;
use crate::state::{AmmPool, AuditRecord, BridgeConfig, DepositRecord, WithdrawalRecord};

declare_id!("EzBkC8P5wxab9kwrtV5hRdynHAfB5w3UPcPXNgMseVA8");

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = BridgeConfig::LEN,
        seeds = [BridgeConfig::SEED],
        bump
    )]
    pub config: Account<'info, BridgeConfig>,
    /// The wXMR mint; its mint authority must already be the config PDA.
    pub wxmr_mint: Account<'info, Mint>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateDepositAccount<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        init,
        payer = user,
        space = DepositRecord::LEN,
        seeds = [DepositRecord::SEED_PREFIX, user.key().as_ref()],
        bump
    )]
    pub deposit: Account<'info, DepositRecord>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AssignDepositAddress<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = authority)]
    pub config: Account<'info, BridgeConfig>,
    #[account(mut)]
    pub deposit: Account<'info, DepositRecord>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct MintDeposit<'info> {
    #[account(
        mut,
        seeds = [BridgeConfig::SEED],
        bump = config.bump,
        has_one = authority,
        has_one = wxmr_mint
    )]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        mut,
        seeds = [DepositRecord::SEED_PREFIX, owner.key().as_ref()],
        bump = deposit.bump,
        has_one = owner
    )]
    pub deposit: Account<'info, DepositRecord>,
    #[account(mut)]
    pub wxmr_mint: Account<'info, Mint>,
    /// CHECK: the owner's associated wXMR account. It may not exist yet;
    /// the handler checks and falls back to the escrow account.
    #[account(mut)]
    pub owner_token_account: UncheckedAccount<'info>,
    /// Escrow for mints that predate the owner's token account.
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = wxmr_mint,
        associated_token::authority = deposit
    )]
    pub pending_token_account: Account<'info, TokenAccount>,
    /// CHECK: validated against deposit.owner by the has_one above.
    pub owner: UncheckedAccount<'info>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimPendingMint<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = wxmr_mint)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        seeds = [DepositRecord::SEED_PREFIX, owner.key().as_ref()],
        bump = deposit.bump,
        has_one = owner
    )]
    pub deposit: Account<'info, DepositRecord>,
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        mut,
        associated_token::mint = wxmr_mint,
        associated_token::authority = deposit
    )]
    pub pending_token_account: Account<'info, TokenAccount>,
    #[account(
        mut,
        associated_token::mint = wxmr_mint,
        associated_token::authority = owner
    )]
    pub owner_token_account: Account<'info, TokenAccount>,
    pub wxmr_mint: Account<'info, Mint>,
    /// CHECK: bridge authority; receives the escrow account's rent.
    #[account(mut, address = config.authority)]
    pub authority: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct CloseDepositAccount<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        mut,
        seeds = [DepositRecord::SEED_PREFIX, user.key().as_ref()],
        bump = deposit.bump,
        constraint = deposit.owner == user.key()
    )]
    pub deposit: Account<'info, DepositRecord>,
    #[account(mut)]
    pub user: Signer<'info>,
    /// CHECK: bridge authority; receives rent when an address was assigned
    /// (compensation for the abandoned subaddress).
    #[account(mut, address = config.authority)]
    pub authority: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(nonce: u64)]
pub struct RequestWithdrawal<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = wxmr_mint)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        init,
        payer = user,
        space = WithdrawalRecord::LEN,
        seeds = [WithdrawalRecord::SEED_PREFIX, user.key().as_ref(), &nonce.to_le_bytes()],
        bump
    )]
    pub withdrawal: Account<'info, WithdrawalRecord>,
    #[account(mut)]
    pub wxmr_mint: Account<'info, Mint>,
    #[account(
        mut,
        constraint = user_token_account.mint == wxmr_mint.key() @ ErrorCode::InvalidMint
    )]
    pub user_token_account: Account<'info, TokenAccount>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct MarkWithdrawalSending<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = authority)]
    pub config: Account<'info, BridgeConfig>,
    #[account(mut)]
    pub withdrawal: Account<'info, WithdrawalRecord>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct CompleteWithdrawal<'info> {
    #[account(
        mut,
        seeds = [BridgeConfig::SEED],
        bump = config.bump,
        has_one = authority
    )]
    pub config: Account<'info, BridgeConfig>,
    #[account(mut, close = user, has_one = user)]
    pub withdrawal: Account<'info, WithdrawalRecord>,
    /// CHECK: the withdrawal's user; receives the record's rent back.
    #[account(mut)]
    pub user: UncheckedAccount<'info>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct RevertWithdrawal<'info> {
    #[account(
        seeds = [BridgeConfig::SEED],
        bump = config.bump,
        has_one = authority,
        has_one = wxmr_mint
    )]
    pub config: Account<'info, BridgeConfig>,
    #[account(mut, close = user, has_one = user)]
    pub withdrawal: Account<'info, WithdrawalRecord>,
    #[account(mut)]
    pub wxmr_mint: Account<'info, Mint>,
    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ ErrorCode::InvalidOwner,
        constraint = user_token_account.mint == wxmr_mint.key() @ ErrorCode::InvalidMint
    )]
    pub user_token_account: Account<'info, TokenAccount>,
    /// CHECK: the withdrawal's user; receives the re-mint and the rent.
    #[account(mut)]
    pub user: UncheckedAccount<'info>,
    pub authority: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(epoch: u64, circulating_supply: u64, spendable_balance: u64, unconfirmed_balance: u64, data: String)]
pub struct CreateAuditRecord<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = authority)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        init,
        payer = authority,
        space = AuditRecord::space(data.len()),
        seeds = [AuditRecord::SEED_PREFIX, &epoch.to_le_bytes()],
        bump
    )]
    pub audit: Account<'info, AuditRecord>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(epoch: u64)]
pub struct ExtendAuditData<'info> {
    #[account(seeds = [BridgeConfig::SEED], bump = config.bump, has_one = authority)]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        mut,
        seeds = [AuditRecord::SEED_PREFIX, &epoch.to_le_bytes()],
        bump = audit.bump
    )]
    pub audit: Account<'info, AuditRecord>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct InitializeAmm<'info> {
    #[account(
        seeds = [BridgeConfig::SEED],
        bump = config.bump,
        has_one = authority,
        has_one = wxmr_mint
    )]
    pub config: Account<'info, BridgeConfig>,
    #[account(
        init,
        payer = authority,
        space = AmmPool::LEN,
        seeds = [AmmPool::SEED],
        bump
    )]
    pub pool: Account<'info, AmmPool>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub wxmr_mint: Account<'info, Mint>,
    pub usdc_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = authority,
        seeds = [AmmPool::WXMR_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = wxmr_mint,
        token::authority = pool
    )]
    pub pool_wxmr: Account<'info, TokenAccount>,
    #[account(
        init,
        payer = authority,
        seeds = [AmmPool::USDC_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = usdc_mint,
        token::authority = pool
    )]
    pub pool_usdc: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct UpdatePrice<'info> {
    #[account(mut, seeds = [AmmPool::SEED], bump = pool.bump, has_one = authority)]
    pub pool: Account<'info, AmmPool>,
    pub authority: Signer<'info>,
}

/// Shared by buy_wxmr and sell_wxmr; the two handlers differ only in
/// direction.
#[derive(Accounts)]
pub struct SwapTokens<'info> {
    #[account(
        mut,
        seeds = [AmmPool::SEED],
        bump = pool.bump,
        has_one = pool_wxmr,
        has_one = pool_usdc
    )]
    pub pool: Account<'info, AmmPool>,
    #[account(mut)]
    pub user: Signer<'info>,
    #[account(
        mut,
        constraint = user_wxmr.mint == pool.wxmr_mint @ ErrorCode::InvalidMint
    )]
    pub user_wxmr: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = user_usdc.mint == pool.usdc_mint @ ErrorCode::InvalidMint
    )]
    pub user_usdc: Account<'info, TokenAccount>,
    #[account(mut)]
    pub pool_wxmr: Account<'info, TokenAccount>,
    #[account(mut)]
    pub pool_usdc: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

/// Shared by add_liquidity and remove_liquidity.
#[derive(Accounts)]
pub struct ManageLiquidity<'info> {
    #[account(
        mut,
        seeds = [AmmPool::SEED],
        bump = pool.bump,
        has_one = authority,
        has_one = pool_wxmr,
        has_one = pool_usdc
    )]
    pub pool: Account<'info, AmmPool>,
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        mut,
        constraint = authority_wxmr.mint == pool.wxmr_mint @ ErrorCode::InvalidMint
    )]
    pub authority_wxmr: Account<'info, TokenAccount>,
    #[account(
        mut,
        constraint = authority_usdc.mint == pool.usdc_mint @ ErrorCode::InvalidMint
    )]
    pub authority_usdc: Account<'info, TokenAccount>,
    #[account(mut)]
    pub pool_wxmr: Account<'info, TokenAccount>,
    #[account(mut)]
    pub pool_usdc: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SetAmmEnabled<'info> {
    #[account(mut, seeds = [AmmPool::SEED], bump = pool.bump, has_one = authority)]
    pub pool: Account<'info, AmmPool>,
    pub authority: Signer<'info>,
}

#[program]
pub mod wxmr_bridge {
    use super::*;

    /// One-time setup of the bridge config (authority only).
    pub fn initialize(ctx: Context<Initialize>, min_withdrawal: u64) -> Result<()> {
        instructions::initialize::handler(ctx, min_withdrawal)
    }

    /// User creates their permanent deposit account (one per wallet).
    /// Rent serves as the spam deterrent.
    pub fn create_deposit_account(ctx: Context<CreateDepositAccount>) -> Result<()> {
        instructions::create_deposit_account::handler(ctx)
    }

    /// Authority assigns the XMR subaddress; exactly once per account.
    pub fn assign_deposit_address(
        ctx: Context<AssignDepositAddress>,
        xmr_address: String,
    ) -> Result<()> {
        instructions::assign_deposit_address::handler(ctx, xmr_address)
    }

    /// Authority mints wXMR for an observed XMR deposit. Falls back to the
    /// escrow account when the owner has no token account yet.
    pub fn mint_deposit(ctx: Context<MintDeposit>, amount: u64) -> Result<()> {
        instructions::mint_deposit::handler(ctx, amount)
    }

    /// User sweeps escrowed mints into their own token account.
    pub fn claim_pending_mint(ctx: Context<ClaimPendingMint>) -> Result<()> {
        instructions::claim_pending_mint::handler(ctx)
    }

    /// User abandons their deposit account (and its subaddress) for good.
    pub fn close_deposit_account(ctx: Context<CloseDepositAccount>) -> Result<()> {
        instructions::close_deposit_account::handler(ctx)
    }

    /// Burns wXMR and opens a withdrawal record, keyed by (user, nonce).
    pub fn request_withdrawal(
        ctx: Context<RequestWithdrawal>,
        nonce: u64,
        amount: u64,
        xmr_address: String,
    ) -> Result<()> {
        instructions::request_withdrawal::handler(ctx, nonce, amount, xmr_address)
    }

    /// Authority flags a withdrawal before broadcasting XMR. Once Sending,
    /// the record can never be reverted.
    pub fn mark_withdrawal_sending(ctx: Context<MarkWithdrawalSending>) -> Result<()> {
        instructions::mark_withdrawal_sending::handler(ctx)
    }

    /// Authority attaches the XMR transfer proof and closes the record,
    /// refunding its rent to the user.
    pub fn complete_withdrawal(
        ctx: Context<CompleteWithdrawal>,
        xmr_tx_hash: String,
        xmr_tx_key: String,
    ) -> Result<()> {
        instructions::complete_withdrawal::handler(ctx, xmr_tx_hash, xmr_tx_key)
    }

    /// Authority re-mints the burned amount to the user; only from Pending.
    pub fn revert_withdrawal(ctx: Context<RevertWithdrawal>, reason: String) -> Result<()> {
        instructions::revert_withdrawal::handler(ctx, reason)
    }

    /// Authority opens the reserve-proof record for one consolidation epoch.
    pub fn create_audit_record(
        ctx: Context<CreateAuditRecord>,
        epoch: u64,
        circulating_supply: u64,
        spendable_balance: u64,
        unconfirmed_balance: u64,
        data: String,
    ) -> Result<()> {
        instructions::create_audit_record::handler(
            ctx,
            epoch,
            circulating_supply,
            spendable_balance,
            unconfirmed_balance,
            data,
        )
    }

    /// Authority appends proof data to an epoch's record, growing it.
    pub fn extend_audit_data(
        ctx: Context<ExtendAuditData>,
        epoch: u64,
        additional_data: String,
    ) -> Result<()> {
        instructions::extend_audit_data::handler(ctx, epoch, additional_data)
    }

    /// Authority creates the fixed-price pool and its vault accounts.
    pub fn initialize_amm(
        ctx: Context<InitializeAmm>,
        initial_buy_price: u64,
        initial_sell_price: u64,
    ) -> Result<()> {
        instructions::initialize_amm::handler(ctx, initial_buy_price, initial_sell_price)
    }

    /// Oracle price push (authority only).
    pub fn update_price(
        ctx: Context<UpdatePrice>,
        new_buy_price: u64,
        new_sell_price: u64,
    ) -> Result<()> {
        instructions::update_price::handler(ctx, new_buy_price, new_sell_price)
    }

    /// Swap USDC for wXMR at the pool's buy price.
    pub fn buy_wxmr(ctx: Context<SwapTokens>, usdc_amount: u64) -> Result<()> {
        instructions::buy_wxmr::handler(ctx, usdc_amount)
    }

    /// Swap wXMR for USDC at the pool's sell price.
    pub fn sell_wxmr(ctx: Context<SwapTokens>, wxmr_amount: u64) -> Result<()> {
        instructions::sell_wxmr::handler(ctx, wxmr_amount)
    }

    /// Authority tops up pool reserves; prices are untouched.
    pub fn add_liquidity(
        ctx: Context<ManageLiquidity>,
        wxmr_amount: u64,
        usdc_amount: u64,
    ) -> Result<()> {
        instructions::add_liquidity::handler(ctx, wxmr_amount, usdc_amount)
    }

    /// Authority withdraws pool reserves; prices are untouched.
    pub fn remove_liquidity(
        ctx: Context<ManageLiquidity>,
        wxmr_amount: u64,
        usdc_amount: u64,
    ) -> Result<()> {
        instructions::remove_liquidity::handler(ctx, wxmr_amount, usdc_amount)
    }

    /// Circuit breaker for pool trading (authority only).
    pub fn set_amm_enabled(ctx: Context<SetAmmEnabled>, enabled: bool) -> Result<()> {
        instructions::set_amm_enabled::handler(ctx, enabled)
    }
}
