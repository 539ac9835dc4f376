use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{
    ExecutorOptions, MessagingFee, Outcome, Peer, RelayMessage, ResolverConfig, VoteRequest, VotingNft,
};
use crate::events::RemoteVoteSent;
use crate::errors::DisputeError;
use crate::interfaces::endpoint::{self, EndpointAccounts, MessagingParams};
use crate::utils::accounts::{load, store};

#[derive(Accounts)]
#[instruction(dst_eid: u32)]
pub struct RemoteSend<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        seeds = [PEER_SEED, dst_eid.to_le_bytes().as_ref()],
        bump = peer.bump,
    )]
    pub peer: Account<'info, Peer>,

    /// Voting NFT holder, pays the messaging fee
    #[account(mut)]
    pub voter: Signer<'info>,

    /// CHECK: checked against config
    #[account(address = config.endpoint_program @ DisputeError::InvalidAccount)]
    pub endpoint_program: UncheckedAccount<'info>,
}

/// Endpoint parameters for `message`, with the caller's options added to the enforced ones.
pub fn outbound_params(
    config: &ResolverConfig,
    peer: &Peer,
    message: &RelayMessage,
    options: &ExecutorOptions,
) -> Result<MessagingParams> {
    config.require_home()?;
    require!(peer.is_set(), DisputeError::PeerNotSet);
    message.validate()?;

    let options = config.enforced_options(message.msg_type())?.combine(options)?;
    Ok(MessagingParams {
        dst_eid: peer.eid,
        receiver: peer.address,
        message: message.encode()?,
        options: options.to_bytes()?,
        pay_in_lz_token: false,
    })
}

pub fn process_quote_vote_on_remote_dispute<'info>(
    ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
    _dst_eid: u32,
    oracle: Pubkey,
    option: Outcome,
    token_ids: Vec<u64>,
    options: ExecutorOptions,
) -> Result<MessagingFee> {
    // Encoded size does not depend on the power values
    let powers = vec![0; token_ids.len()];
    let message = RelayMessage::Vote(VoteRequest {
        oracle,
        option,
        token_ids,
        powers,
        voter: ctx.accounts.voter.key(),
    });
    let params = outbound_params(&ctx.accounts.config, &ctx.accounts.peer, &message, &options)?;

    endpoint::quote(
        &EndpointAccounts {
            endpoint_program: ctx.accounts.endpoint_program.to_account_info(),
            sender: ctx.accounts.config.to_account_info(),
            extra: ctx.remaining_accounts,
        },
        params,
    )
}

/// Votes on a dispute hosted by a Remote deployment.
///
/// Remaining accounts: one voting NFT per token id, then the endpoint's send accounts.
/// Double votes can only be detected on Remote, where they are dropped.
pub fn process_vote_on_remote_dispute<'info>(
    ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
    dst_eid: u32,
    oracle: Pubkey,
    option: Outcome,
    token_ids: Vec<u64>,
    options: ExecutorOptions,
    native_fee: u64,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    // Guards
    require!(option != Outcome::Pending, DisputeError::CannotVoteForPending);
    require!(!token_ids.is_empty(), DisputeError::EmptyTokenIdsArray);
    require!(ctx.remaining_accounts.len() >= token_ids.len(), DisputeError::AccountCountMismatch);

    let voter = ctx.accounts.voter.key();
    let (nft_accounts, endpoint_accounts) = ctx.remaining_accounts.split_at(token_ids.len());
    let mut powers = Vec::with_capacity(token_ids.len());

    for (token_id, voting_nft) in token_ids.iter().zip(nft_accounts) {
        let mut nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.require_owner_or_approved(&voter)?;
        nft.check_vote(now)?;
        nft.lock_after_vote(now, config.unwrap_cooldown)?;
        store(voting_nft, &nft)?;

        powers.push(nft.power);
    }

    let power = powers
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(*p))
        .ok_or(DisputeError::MathOverflow)?;

    let message = RelayMessage::Vote(VoteRequest {
        oracle,
        option,
        token_ids: token_ids.clone(),
        powers,
        voter,
    });
    let params = outbound_params(config, &ctx.accounts.peer, &message, &options)?;

    let bump = [config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
    let receipt = endpoint::send(
        &EndpointAccounts {
            endpoint_program: ctx.accounts.endpoint_program.to_account_info(),
            sender: config.to_account_info(),
            extra: endpoint_accounts,
        },
        params,
        MessagingFee { native_fee, lz_token_fee: 0 },
        &[seeds],
    )?;

    emit!(RemoteVoteSent {
        dst_eid,
        oracle,
        voter,
        option,
        power,
        token_ids,
        nonce: receipt.nonce,
    });

    Ok(())
}
