use anchor_lang::prelude::*;

pub mod constants;
pub mod state;
pub mod instructions;
pub mod interfaces;
pub mod errors;
pub mod events;
pub mod utils;

use instructions::*;
use state::{ExecutorOptions, LzReceiveParams, MessagingFee, Outcome};

declare_id!("CpHe9x6EJ21gnXYLcq1TRCC9XL1hbvYnhvTzDdT4r3nX");

#[program]
pub mod dispute_resolver {
    use super::*;

    // Admin

    pub fn init_config(ctx: Context<InitConfig>, params: InitConfigParams) -> Result<()> {
        instructions::admin::init_config::process_init_config(ctx, params)
    }

    pub fn set_vote_cooldown(ctx: Context<UpdateConfig>, seconds: i64) -> Result<()> {
        instructions::admin::update_config::set_vote_cooldown(ctx, seconds)
    }

    pub fn set_unwrap_cooldown(ctx: Context<UpdateConfig>, seconds: i64) -> Result<()> {
        instructions::admin::update_config::set_unwrap_cooldown(ctx, seconds)
    }

    pub fn set_penalty_token(ctx: Context<UpdateConfig>, mint: Pubkey) -> Result<()> {
        instructions::admin::update_config::set_penalty_token(ctx, mint)
    }

    pub fn set_enforced_options(ctx: Context<UpdateConfig>, msg_type: u8, options: ExecutorOptions) -> Result<()> {
        instructions::admin::update_config::set_enforced_options(ctx, msg_type, options)
    }

    pub fn set_penalty(ctx: Context<SetPenalty>, token_id: u64, amount: u64) -> Result<()> {
        instructions::admin::set_penalty::process_set_penalty(ctx, token_id, amount)
    }

    pub fn set_peer(ctx: Context<SetPeer>, eid: u32, address: [u8; 32]) -> Result<()> {
        instructions::admin::set_peer::process_set_peer(ctx, eid, address)
    }

    // Voting-power registry

    pub fn wrap<'info>(
        ctx: Context<'_, '_, '_, 'info, Wrap<'info>>,
        recipient: Pubkey,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::registry::wrap::process_wrap(ctx, recipient, token_ids)
    }

    pub fn unwrap<'info>(
        ctx: Context<'_, '_, '_, 'info, Unwrap<'info>>,
        recipient: Pubkey,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::registry::unwrap::process_unwrap(ctx, recipient, token_ids)
    }

    pub fn transfer_voting_nft(ctx: Context<UpdateVotingNft>, token_id: u64, new_owner: Pubkey) -> Result<()> {
        instructions::registry::transfer::process_transfer_voting_nft(ctx, token_id, new_owner)
    }

    pub fn approve_voting_nft(ctx: Context<UpdateVotingNft>, token_id: u64, delegate: Option<Pubkey>) -> Result<()> {
        instructions::registry::transfer::process_approve_voting_nft(ctx, token_id, delegate)
    }

    pub fn pay_penalty(ctx: Context<PayPenalty>, token_id: u64) -> Result<()> {
        instructions::registry::pay_penalty::process_pay_penalty(ctx, token_id)
    }

    // Disputes

    pub fn open_dispute(ctx: Context<OpenDispute>, requested: Outcome, reason: String) -> Result<()> {
        instructions::dispute::open_dispute::process_open_dispute(ctx, requested, reason)
    }

    pub fn vote<'info>(
        ctx: Context<'_, '_, '_, 'info, CastVote<'info>>,
        oracle: Pubkey,
        option: Outcome,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::dispute::cast_vote::process_vote(ctx, oracle, option, token_ids)
    }

    pub fn resolve(ctx: Context<ResolveDispute>, oracle: Pubkey) -> Result<()> {
        instructions::dispute::resolve_dispute::process_resolve(ctx, oracle)
    }

    pub fn take_collateral(ctx: Context<TakeCollateral>, oracle: Pubkey) -> Result<()> {
        instructions::dispute::take_collateral::process_take_collateral(ctx, oracle)
    }

    // Rewards

    pub fn claim_vote_rewards<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimVoteRewards<'info>>,
        oracle: Pubkey,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::rewards::claim_vote_rewards::process_claim_vote_rewards(ctx, oracle, token_ids)
    }

    pub fn claim_stake_rewards<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimStakeRewards<'info>>,
        token_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::rewards::claim_stake_rewards::process_claim_stake_rewards(ctx, token_ids)
    }

    // Cross-chain relay

    pub fn quote_vote_on_remote_dispute<'info>(
        ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
        dst_eid: u32,
        oracle: Pubkey,
        option: Outcome,
        token_ids: Vec<u64>,
        options: ExecutorOptions,
    ) -> Result<MessagingFee> {
        instructions::relay::send_vote::process_quote_vote_on_remote_dispute(ctx, dst_eid, oracle, option, token_ids, options)
    }

    pub fn vote_on_remote_dispute<'info>(
        ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
        dst_eid: u32,
        oracle: Pubkey,
        option: Outcome,
        token_ids: Vec<u64>,
        options: ExecutorOptions,
        native_fee: u64,
    ) -> Result<()> {
        instructions::relay::send_vote::process_vote_on_remote_dispute(
            ctx, dst_eid, oracle, option, token_ids, options, native_fee,
        )
    }

    pub fn quote_claim_on_remote_dispute<'info>(
        ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
        dst_eid: u32,
        oracle: Pubkey,
        token_ids: Vec<u64>,
        options: ExecutorOptions,
    ) -> Result<MessagingFee> {
        instructions::relay::send_claim::process_quote_claim_on_remote_dispute(ctx, dst_eid, oracle, token_ids, options)
    }

    pub fn claim_rewards_on_remote_dispute<'info>(
        ctx: Context<'_, '_, '_, 'info, RemoteSend<'info>>,
        dst_eid: u32,
        oracle: Pubkey,
        token_ids: Vec<u64>,
        options: ExecutorOptions,
        native_fee: u64,
    ) -> Result<()> {
        instructions::relay::send_claim::process_claim_rewards_on_remote_dispute(
            ctx, dst_eid, oracle, token_ids, options, native_fee,
        )
    }

    pub fn lz_receive<'info>(
        ctx: Context<'_, '_, '_, 'info, LzReceive<'info>>,
        params: LzReceiveParams,
    ) -> Result<()> {
        instructions::relay::lz_receive::process_lz_receive(ctx, params)
    }

    // Views

    pub fn get_dispute_info(ctx: Context<DisputeView>, oracle: Pubkey) -> Result<DisputeInfo> {
        instructions::views::dispute_views::process_get_dispute_info(ctx, oracle)
    }

    pub fn get_vote_count(ctx: Context<DisputeView>, oracle: Pubkey, option: Outcome) -> Result<u128> {
        instructions::views::dispute_views::process_get_vote_count(ctx, oracle, option)
    }

    pub fn get_dispute_collateral(ctx: Context<DisputeView>, oracle: Pubkey) -> Result<DisputeCollateral> {
        instructions::views::dispute_views::process_get_dispute_collateral(ctx, oracle)
    }

    pub fn get_required_collateral(ctx: Context<CollateralQuote>) -> Result<u64> {
        instructions::views::dispute_views::process_get_required_collateral(ctx)
    }

    pub fn get_vote_record_info(ctx: Context<VoteRecordView>, oracle: Pubkey, token_id: u64) -> Result<VoteRecordInfo> {
        instructions::views::dispute_views::process_get_vote_record_info(ctx, oracle, token_id)
    }

    pub fn has_voted(ctx: Context<VoteRecordView>, oracle: Pubkey, token_id: u64) -> Result<bool> {
        instructions::views::dispute_views::process_has_voted(ctx, oracle, token_id)
    }

    pub fn can_vote(ctx: Context<VotingNftView>, token_id: u64) -> Result<bool> {
        instructions::views::registry_views::process_can_vote(ctx, token_id)
    }

    pub fn can_unstake(ctx: Context<VotingNftView>, token_id: u64) -> Result<bool> {
        instructions::views::registry_views::process_can_unstake(ctx, token_id)
    }

    pub fn get_unclaimed_vote_rewards(
        ctx: Context<VoteHistoryView>,
        token_id: u64,
        offset: u64,
        limit: u64,
    ) -> Result<UnclaimedVoteRewards> {
        instructions::views::registry_views::process_get_unclaimed_vote_rewards(ctx, token_id, offset, limit)
    }
}
