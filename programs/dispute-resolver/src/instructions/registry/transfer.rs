use anchor_lang::prelude::*;
use crate::constants::VOTING_NFT_SEED;
use crate::state::VotingNft;
use crate::events::{VotingNftApproved, VotingNftTransferred};

#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct UpdateVotingNft<'info> {
    #[account(
        mut,
        seeds = [VOTING_NFT_SEED, token_id.to_le_bytes().as_ref()],
        bump = voting_nft.bump,
    )]
    pub voting_nft: Account<'info, VotingNft>,

    pub caller: Signer<'info>,
}

/// Moves a voting NFT, and with it the right to claim its vote rewards.
pub fn process_transfer_voting_nft(ctx: Context<UpdateVotingNft>, token_id: u64, new_owner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let nft = &mut ctx.accounts.voting_nft;
    let from = nft.owner;

    nft.transfer(&ctx.accounts.caller.key(), new_owner, now)?;

    emit!(VotingNftTransferred { token_id, from, to: new_owner });
    Ok(())
}

pub fn process_approve_voting_nft(ctx: Context<UpdateVotingNft>, token_id: u64, delegate: Option<Pubkey>) -> Result<()> {
    let nft = &mut ctx.accounts.voting_nft;
    nft.approve(&ctx.accounts.caller.key(), delegate)?;

    emit!(VotingNftApproved { token_id, owner: nft.owner, approved: delegate });
    Ok(())
}
