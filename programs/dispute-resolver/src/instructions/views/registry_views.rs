use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{VoteHistory, VoteRecord, VotingNft};
use crate::errors::DisputeError;
use crate::utils::accounts::{is_initialized, load, require_address};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UnclaimedVoteRewards {
    /// Length of the token's whole vote history
    pub total: u64,
    pub oracles: Vec<Pubkey>,
}

#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct VotingNftView<'info> {
    #[account(
        seeds = [VOTING_NFT_SEED, token_id.to_le_bytes().as_ref()],
        bump = voting_nft.bump,
    )]
    pub voting_nft: Account<'info, VotingNft>,
}

#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct VoteHistoryView<'info> {
    /// CHECK: history PDA, empty if the token never voted
    #[account(
        seeds = [VOTE_HISTORY_SEED, token_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub vote_history: UncheckedAccount<'info>,
}

pub fn process_can_vote(ctx: Context<VotingNftView>, _token_id: u64) -> Result<bool> {
    Ok(ctx.accounts.voting_nft.can_vote(Clock::get()?.unix_timestamp))
}

pub fn process_can_unstake(ctx: Context<VotingNftView>, _token_id: u64) -> Result<bool> {
    Ok(ctx.accounts.voting_nft.can_unstake(Clock::get()?.unix_timestamp))
}

/// Unclaimed oracles among `history[offset..offset + limit]`.
///
/// Remaining accounts: the vote record of each oracle in that page, in order.
pub fn process_get_unclaimed_vote_rewards(
    ctx: Context<VoteHistoryView>,
    token_id: u64,
    offset: u64,
    limit: u64,
) -> Result<UnclaimedVoteRewards> {
    let info = ctx.accounts.vote_history.to_account_info();
    if !is_initialized(&info) {
        return Ok(UnclaimedVoteRewards::default());
    }
    let history: VoteHistory = load(&info)?;
    let page = history.page(offset, limit);
    require!(ctx.remaining_accounts.len() == page.len(), DisputeError::AccountCountMismatch);

    let mut oracles = Vec::with_capacity(page.len());
    for (oracle, record_info) in page.iter().zip(ctx.remaining_accounts) {
        require_address(record_info, &VoteRecord::address(oracle, token_id).0)?;
        if !is_initialized(record_info) {
            continue;
        }
        let record: VoteRecord = load(record_info)?;
        if !record.claimed {
            oracles.push(*oracle);
        }
    }

    Ok(UnclaimedVoteRewards { total: history.total(), oracles })
}
