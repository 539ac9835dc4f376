use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::state::{ClaimRewardsRequest, ExecutorOptions, MessagingFee, RelayMessage, VotingNft};
use crate::events::RemoteClaimSent;
use crate::errors::DisputeError;
use crate::interfaces::endpoint::{self, EndpointAccounts};
use crate::utils::accounts::load;
use super::send_vote::{outbound_params, RemoteSend};

pub fn process_quote_claim_on_remote_dispute<'info>(
    ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
    _dst_eid: u32,
    oracle: Pubkey,
    token_ids: Vec<u64>,
    options: ExecutorOptions,
) -> Result<MessagingFee> {
    let message = RelayMessage::ClaimRewards(ClaimRewardsRequest {
        oracle,
        token_ids,
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

/// Claims vote rewards on a Remote dispute, paid to the caller's address on that chain.
///
/// Remaining accounts: one voting NFT per token id, then the endpoint's send accounts.
pub fn process_claim_rewards_on_remote_dispute<'info>(
    ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
    dst_eid: u32,
    oracle: Pubkey,
    token_ids: Vec<u64>,
    options: ExecutorOptions,
    native_fee: u64,
) -> Result<()> {
    let config = &ctx.accounts.config;

    // Guards
    require!(!token_ids.is_empty(), DisputeError::EmptyTokenIdsArray);
    require!(ctx.remaining_accounts.len() >= token_ids.len(), DisputeError::AccountCountMismatch);

    let voter = ctx.accounts.voter.key();
    let (nft_accounts, endpoint_accounts) = ctx.remaining_accounts.split_at(token_ids.len());

    for (token_id, voting_nft) in token_ids.iter().zip(nft_accounts) {
        let nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.require_owner_or_approved(&voter)?;
        nft.require_no_penalty()?;
    }

    let message = RelayMessage::ClaimRewards(ClaimRewardsRequest {
        oracle,
        token_ids: token_ids.clone(),
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

    emit!(RemoteClaimSent {
        dst_eid,
        oracle,
        voter,
        token_ids,
        nonce: receipt.nonce,
    });

    Ok(())
}
