use anchor_lang::prelude::*;
use crate::constants::{CONFIG_SEED, VOTING_NFT_SEED};
use crate::state::{ResolverConfig, VotingNft};
use crate::events::PenaltySet;
use crate::errors::DisputeError;

#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct SetPenalty<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ DisputeError::Unauthorized
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        mut,
        seeds = [VOTING_NFT_SEED, token_id.to_le_bytes().as_ref()],
        bump = voting_nft.bump,
    )]
    pub voting_nft: Account<'info, VotingNft>,

    pub admin: Signer<'info>,
}

/// Sets (or clears, with `amount == 0`) the penalty blocking `token_id`.
pub fn process_set_penalty(ctx: Context<SetPenalty>, token_id: u64, amount: u64) -> Result<()> {
    // Guards
    let mint = ctx.accounts.config.penalty_token()?;

    let nft = &mut ctx.accounts.voting_nft;
    nft.set_penalty(amount, mint);

    emit!(PenaltySet { token_id, amount, mint });
    Ok(())
}
