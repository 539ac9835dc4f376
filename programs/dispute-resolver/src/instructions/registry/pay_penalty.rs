use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::constants::{CONFIG_SEED, VOTING_NFT_SEED};
use crate::state::{ResolverConfig, VotingNft};
use crate::events::PenaltyPaid;
use crate::errors::DisputeError;
use crate::interfaces::fee_vault::FeeVault;
use crate::interfaces::ExternalAccount;

#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct PayPenalty<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        mut,
        seeds = [VOTING_NFT_SEED, token_id.to_le_bytes().as_ref()],
        bump = voting_nft.bump,
    )]
    pub voting_nft: Account<'info, VotingNft>,

    #[account(constraint = penalty_mint.key() == voting_nft.penalty.mint @ DisputeError::InvalidMint)]
    pub penalty_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = penalty_mint,
        token::authority = payer,
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

    /// CHECK: owner and layout checked when loaded as a FeeVault
    #[account(address = config.fee_vault @ DisputeError::InvalidAccount)]
    pub fee_vault: UncheckedAccount<'info>,

    #[account(mut, token::mint = penalty_mint)]
    pub fee_vault_token_account: Account<'info, TokenAccount>,

    /// Anyone may pay a token's penalty
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_pay_penalty(ctx: Context<PayPenalty>, token_id: u64) -> Result<()> {
    let vault = FeeVault::load(&ctx.accounts.fee_vault, &ctx.accounts.config.fee_vault_program)?;
    vault.require_fee_account(&ctx.accounts.fee_vault_token_account.to_account_info())?;

    let due = ctx.accounts.voting_nft.settle_penalty()?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.payer_token_account.to_account_info(),
                to: ctx.accounts.fee_vault_token_account.to_account_info(),
                authority: ctx.accounts.payer.to_account_info(),
            },
        ),
        due.amount,
    )?;

    emit!(PenaltyPaid {
        token_id,
        payer: ctx.accounts.payer.key(),
        amount: due.amount,
        mint: due.mint,
    });

    Ok(())
}
