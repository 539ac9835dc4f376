use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{ClaimBatch, DisputeRecord, DisputeState, ResolverConfig, VoteRecord, VotingNft};
use crate::events::VoteRewardClaimed;
use crate::errors::DisputeError;
use crate::utils::accounts::{is_initialized, load, require_address, store};

/// `[voting_nft, vote_record]`
pub const CLAIM_ACCOUNTS_PER_TOKEN: usize = 2;

#[derive(Accounts)]
#[instruction(oracle: Pubkey)]
pub struct ClaimVoteRewards<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
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
        constraint = claimer_token_account.mint == dispute.market_mint @ DisputeError::InvalidMint,
    )]
    pub claimer_token_account: Account<'info, TokenAccount>,

    /// Current owner or approved operator of every voting NFT
    pub claimer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Vote record of `token_id` on `oracle`, provided it exists and is unclaimed.
pub fn claimable_record(info: &AccountInfo, oracle: &Pubkey, token_id: u64) -> Result<VoteRecord> {
    let (address, _) = VoteRecord::address(oracle, token_id);
    require_address(info, &address)?;
    require!(is_initialized(info), DisputeError::TokenIdDidNotVote);

    let record: VoteRecord = load(info)?;
    require!(!record.claimed, DisputeError::AlreadyClaimedForTokenId);
    Ok(record)
}

pub fn process_claim_vote_rewards<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimVoteRewards<'info>>,
    oracle: Pubkey,
    token_ids: Vec<u64>,
) -> Result<()> {
    let dispute = &ctx.accounts.dispute;

    // Guards
    ctx.accounts.config.require_home()?;
    require!(dispute.state == DisputeState::Resolved, DisputeError::DisputeNotResolved);
    require!(!token_ids.is_empty(), DisputeError::EmptyTokenIdsArray);
    require!(
        ctx.remaining_accounts.len() == token_ids.len() * CLAIM_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let claimer = ctx.accounts.claimer.key();
    let mut batch = ClaimBatch::default();

    for (token_id, accounts) in token_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(CLAIM_ACCOUNTS_PER_TOKEN))
    {
        let [voting_nft, record_info] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.require_owner_or_approved(&claimer)?;
        nft.require_no_penalty()?;

        let mut record = claimable_record(record_info, &oracle, *token_id)?;
        let amount = batch.settle(dispute, &mut record)?;
        store(record_info, &record)?;

        emit!(VoteRewardClaimed {
            voter: claimer,
            oracle,
            token_id: *token_id,
            amount,
        });
    }

    if batch.total > 0 {
        let bump = [ctx.accounts.config.bump];
        let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.escrow.to_account_info(),
                    to: ctx.accounts.claimer_token_account.to_account_info(),
                    authority: ctx.accounts.config.to_account_info(),
                },
                &[seeds],
            ),
            batch.total,
        )?;
    }

    Ok(())
}
