use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, Transfer};
use crate::constants::*;
use crate::state::{
    Ballot, ClaimBatch, ClaimRewardsRequest, DisputeRecord, DisputeState, LzReceiveParams, Peer, RelayMessage,
    RelayReport, ResolverConfig, VoteBatch, VoteRecord, VoteRequest,
};
use crate::events::{RemoteRequestProcessed, VoteCast, VoteRewardClaimed};
use crate::errors::DisputeError;
use crate::interfaces::endpoint::delivery_authority;
use crate::utils::accounts::{is_initialized, load, require_address, store, token_account};
use crate::instructions::dispute::{record_vote, vote_slot};

/// `[vote_record, vote_history]`
pub const RELAYED_VOTE_ACCOUNTS_PER_TOKEN: usize = 2;

#[derive(Accounts)]
#[instruction(params: LzReceiveParams)]
pub struct LzReceive<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        seeds = [PEER_SEED, params.src_eid.to_le_bytes().as_ref()],
        bump = peer.bump,
    )]
    pub peer: Account<'info, Peer>,

    /// Endpoint delivery PDA
    pub endpoint_authority: Signer<'info>,

    /// Executor account funding vote records
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: dispute PDA of the message's oracle, may not exist yet
    #[account(mut)]
    pub dispute: UncheckedAccount<'info>,

    /// CHECK: escrow of the dispute's market mint, required for claims
    #[account(mut)]
    pub escrow: Option<UncheckedAccount<'info>>,

    /// CHECK: voter's token account for the market mint, required for claims
    #[account(mut)]
    pub recipient_token_account: Option<UncheckedAccount<'info>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Replays a Home request on this Remote deployment.
///
/// Per-id problems (already voted, already claimed, never voted) and a dispute
/// that is not in the right state skip the affected ids rather than fail the
/// delivery, which would otherwise block the channel.
pub fn process_lz_receive<'info>(
    ctx: Context<'_, '_, '_, 'info, LzReceive<'info>>,
    params: LzReceiveParams,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let peer = &ctx.accounts.peer;

    // Guards
    config.require_remote()?;
    require_keys_eq!(
        ctx.accounts.endpoint_authority.key(),
        delivery_authority(&config.endpoint_program),
        DisputeError::Unauthorized
    );
    require!(
        params.src_eid == config.home_eid && peer.is_set() && params.sender == peer.address,
        DisputeError::UntrustedPeer
    );

    let message = RelayMessage::decode(&params.message)?;
    let oracle = message.oracle();
    require_address(&ctx.accounts.dispute, &DisputeRecord::address(&oracle).0)?;

    let report = match &message {
        RelayMessage::Vote(req) => apply_vote(&ctx, req)?,
        RelayMessage::ClaimRewards(req) => apply_claim(&ctx, req)?,
    };

    emit!(RemoteRequestProcessed {
        src_eid: params.src_eid,
        nonce: params.nonce,
        msg_type: message.msg_type(),
        oracle,
        applied: report.applied,
        skipped: report.skipped,
    });

    Ok(())
}

fn apply_vote<'info>(
    ctx: &Context<'_, '_, '_, 'info, LzReceive<'info>>,
    req: &VoteRequest,
) -> Result<RelayReport> {
    require!(
        ctx.remaining_accounts.len() == req.token_ids.len() * RELAYED_VOTE_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let dispute_info = ctx.accounts.dispute.to_account_info();
    if !is_initialized(&dispute_info) {
        msg!("no dispute for {}", req.oracle);
        return Ok(RelayReport::skip_all(req.token_ids.len()));
    }
    let mut dispute: DisputeRecord = load(&dispute_info)?;
    let now = Clock::get()?.unix_timestamp;
    if let Err(e) = dispute.is_accepting_votes(now) {
        msg!("dispute {} not accepting votes: {}", req.oracle, e);
        return Ok(RelayReport::skip_all(req.token_ids.len()));
    }

    let payer = ctx.accounts.payer.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let mut batch = VoteBatch::default();

    for ((token_id, token_power), accounts) in req
        .token_ids
        .iter()
        .zip(&req.powers)
        .zip(ctx.remaining_accounts.chunks(RELAYED_VOTE_ACCOUNTS_PER_TOKEN))
    {
        let [record, history] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let ballot = Ballot {
            option: req.option,
            token_id: *token_id,
            power: *token_power,
            voter: req.voter,
        };
        let slot = vote_slot(record, &req.oracle, *token_id)?;
        let Some(record_bump) = batch.apply(&mut dispute, &ballot, slot)? else {
            continue;
        };
        record_vote(req.oracle, &ballot, record_bump, record, history, &payer, &system_program)?;
    }

    store(&dispute_info, &dispute)?;

    if !batch.counted.is_empty() {
        emit!(VoteCast {
            voter: req.voter,
            oracle: req.oracle,
            option: req.option,
            power: batch.power,
            token_ids: batch.counted,
        });
    }

    Ok(batch.report)
}

fn apply_claim<'info>(
    ctx: &Context<'_, '_, '_, 'info, LzReceive<'info>>,
    req: &ClaimRewardsRequest,
) -> Result<RelayReport> {
    require!(
        ctx.remaining_accounts.len() == req.token_ids.len(),
        DisputeError::AccountCountMismatch
    );

    let dispute_info = ctx.accounts.dispute.to_account_info();
    if !is_initialized(&dispute_info) {
        msg!("no dispute for {}", req.oracle);
        return Ok(RelayReport::skip_all(req.token_ids.len()));
    }
    let dispute: DisputeRecord = load(&dispute_info)?;
    if dispute.state != DisputeState::Resolved {
        msg!("dispute {} not resolved", req.oracle);
        return Ok(RelayReport::skip_all(req.token_ids.len()));
    }

    let escrow = ctx.accounts.escrow.as_ref().ok_or(DisputeError::InvalidAccount)?;
    let recipient = ctx
        .accounts
        .recipient_token_account
        .as_ref()
        .ok_or(DisputeError::InvalidAccount)?;

    let (escrow_address, _) =
        Pubkey::find_program_address(&[ESCROW_SEED, dispute.market_mint.as_ref()], &crate::ID);
    require_address(escrow, &escrow_address)?;

    let recipient_account = token_account(recipient)?;
    require_keys_eq!(recipient_account.mint, dispute.market_mint, DisputeError::InvalidMint);
    require_keys_eq!(recipient_account.owner, req.voter, DisputeError::InvalidAccount);

    let mut batch = ClaimBatch::default();

    for (token_id, record_info) in req.token_ids.iter().zip(ctx.remaining_accounts) {
        let (address, _) = VoteRecord::address(&req.oracle, *token_id);
        require_address(record_info, &address)?;

        let mut record: Option<VoteRecord> = if is_initialized(record_info) {
            Some(load(record_info)?)
        } else {
            None
        };
        let Some(amount) = batch.settle_or_skip(&dispute, record.as_mut())? else {
            continue;
        };
        if let Some(record) = &record {
            store(record_info, record)?;
        }

        emit!(VoteRewardClaimed {
            voter: req.voter,
            oracle: req.oracle,
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
                    from: escrow.to_account_info(),
                    to: recipient.to_account_info(),
                    authority: ctx.accounts.config.to_account_info(),
                },
                &[seeds],
            ),
            batch.total,
        )?;
    }

    Ok(batch.report)
}
