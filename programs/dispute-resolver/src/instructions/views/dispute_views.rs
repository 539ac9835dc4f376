use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{DisputeRecord, DisputeState, Outcome, ResolverConfig, VoteRecord};
use crate::interfaces::market::market_for_oracle;
use crate::utils::accounts::{is_initialized, load};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DisputeInfo {
    pub disputer: Pubkey,
    pub state: DisputeState,
    pub draft_status: Outcome,
    pub final_status: Outcome,
    pub deposit: u64,
    pub end_at: i64,
    pub market_mint: Pubkey,
    pub reason: String,
    pub is_collateral_taken: bool,
}

impl Default for DisputeInfo {
    fn default() -> Self {
        Self {
            disputer: Pubkey::default(),
            state: DisputeState::NotActive,
            draft_status: Outcome::Pending,
            final_status: Outcome::Pending,
            deposit: 0,
            end_at: 0,
            market_mint: Pubkey::default(),
            reason: String::new(),
            is_collateral_taken: false,
        }
    }
}

impl From<&DisputeRecord> for DisputeInfo {
    fn from(d: &DisputeRecord) -> Self {
        Self {
            disputer: d.disputer,
            state: d.state,
            draft_status: d.draft_status,
            final_status: d.final_status,
            deposit: d.deposit,
            end_at: d.end_at,
            market_mint: d.market_mint,
            reason: d.reason.clone(),
            is_collateral_taken: d.collateral_taken,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisputeCollateral {
    pub amount: u64,
    pub mint: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteRecordInfo {
    pub power: u64,
    pub is_claimed: bool,
    pub voted_for: Outcome,
}

impl Default for VoteRecordInfo {
    fn default() -> Self {
        Self { power: 0, is_claimed: false, voted_for: Outcome::Pending }
    }
}

#[derive(Accounts)]
#[instruction(oracle: Pubkey)]
pub struct DisputeView<'info> {
    /// CHECK: dispute PDA, read only if it exists
    #[account(
        seeds = [DISPUTE_SEED, oracle.as_ref()],
        bump,
    )]
    pub dispute: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(oracle: Pubkey, token_id: u64)]
pub struct VoteRecordView<'info> {
    /// CHECK: vote record PDA, read only if it exists
    #[account(
        seeds = [VOTE_RECORD_SEED, oracle.as_ref(), token_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub vote_record: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct CollateralQuote<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    /// CHECK: oracle the dispute would target
    pub oracle: UncheckedAccount<'info>,

    /// CHECK: market factory index entry for `oracle`
    pub oracle_market: UncheckedAccount<'info>,

    /// CHECK: must match the factory index entry
    pub market: UncheckedAccount<'info>,
}

fn read_dispute(info: &AccountInfo) -> Result<Option<DisputeRecord>> {
    if !is_initialized(info) {
        return Ok(None);
    }
    load(info).map(Some)
}

fn read_vote_record(info: &AccountInfo) -> Result<Option<VoteRecord>> {
    if !is_initialized(info) {
        return Ok(None);
    }
    load(info).map(Some)
}

pub fn process_get_dispute_info(ctx: Context<DisputeView>, _oracle: Pubkey) -> Result<DisputeInfo> {
    Ok(read_dispute(&ctx.accounts.dispute)?
        .as_ref()
        .map(DisputeInfo::from)
        .unwrap_or_default())
}

pub fn process_get_vote_count(ctx: Context<DisputeView>, _oracle: Pubkey, option: Outcome) -> Result<u128> {
    Ok(read_dispute(&ctx.accounts.dispute)?
        .map(|d| d.vote_count(option))
        .unwrap_or(0))
}

pub fn process_get_dispute_collateral(ctx: Context<DisputeView>, _oracle: Pubkey) -> Result<DisputeCollateral> {
    Ok(read_dispute(&ctx.accounts.dispute)?
        .map(|d| DisputeCollateral { amount: d.deposit, mint: d.market_mint })
        .unwrap_or_default())
}

pub fn process_get_required_collateral(ctx: Context<CollateralQuote>) -> Result<u64> {
    let config = &ctx.accounts.config;
    let market = market_for_oracle(
        &ctx.accounts.oracle.key(),
        &ctx.accounts.oracle_market,
        &ctx.accounts.market,
        &config.market_factory_program,
        &config.market_program,
    )?;
    Ok(DisputeRecord::required_collateral(market.collateral_tvl))
}

pub fn process_get_vote_record_info(
    ctx: Context<VoteRecordView>,
    _oracle: Pubkey,
    _token_id: u64,
) -> Result<VoteRecordInfo> {
    Ok(read_vote_record(&ctx.accounts.vote_record)?
        .map(|r| VoteRecordInfo { power: r.power, is_claimed: r.claimed, voted_for: r.voted_for })
        .unwrap_or_default())
}

pub fn process_has_voted(ctx: Context<VoteRecordView>, _oracle: Pubkey, _token_id: u64) -> Result<bool> {
    Ok(is_initialized(&ctx.accounts.vote_record))
}
