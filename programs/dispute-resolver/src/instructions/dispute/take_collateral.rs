use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{DisputeRecord, ResolverConfig};
use crate::events::{CollateralTaken, DisputeFailed};
use crate::errors::DisputeError;

#[derive(Accounts)]
#[instruction(oracle: Pubkey)]
pub struct TakeCollateral<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        mut,
        seeds = [DISPUTE_SEED, oracle.as_ref()],
        bump = dispute.bump,
    )]
    pub dispute: Account<'info, DisputeRecord>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, dispute.market_mint.as_ref()],
        bump,
    )]
    pub escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = disputer_token_account.mint == dispute.market_mint @ DisputeError::InvalidMint,
        token::authority = disputer,
    )]
    pub disputer_token_account: Account<'info, TokenAccount>,

    pub disputer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_take_collateral(ctx: Context<TakeCollateral>, oracle: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let disputer = ctx.accounts.disputer.key();
    let release = ctx.accounts.dispute.take_collateral(&disputer, now)?;

    if release.failed_now {
        msg!("dispute on {} expired without votes", oracle);
        emit!(DisputeFailed { oracle, disputer });
    }

    let bump = [ctx.accounts.config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow.to_account_info(),
                to: ctx.accounts.disputer_token_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            &[seeds],
        ),
        release.amount,
    )?;

    emit!(CollateralTaken {
        disputer,
        oracle,
        amount: release.amount,
        market_mint: ctx.accounts.dispute.market_mint,
    });

    Ok(())
}
