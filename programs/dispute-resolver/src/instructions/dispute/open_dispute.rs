use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{DisputeRecord, OpenRequest, Outcome, ResolverConfig};
use crate::events::DisputeCreated;
use crate::errors::DisputeError;
use crate::interfaces::market::market_for_oracle;
use crate::interfaces::oracle::{start_arbitration, ArbitrationAccounts, OracleState};
use crate::interfaces::ExternalAccount;

#[derive(Accounts)]
pub struct OpenDispute<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    /// CHECK: loaded as OracleState, owner checked against the configured oracle program
    #[account(mut)]
    pub oracle: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        seeds = [DISPUTE_SEED, oracle.key().as_ref()],
        bump,
        payer = disputer,
        space = DisputeRecord::LEN
    )]
    pub dispute: Account<'info, DisputeRecord>,

    /// CHECK: market factory index entry for `oracle`, verified in the handler
    pub oracle_market: UncheckedAccount<'info>,

    /// CHECK: must match the factory index entry, loaded as MarketState
    pub market: UncheckedAccount<'info>,

    pub collateral_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = disputer,
    )]
    pub disputer_token_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        seeds = [ESCROW_SEED, collateral_mint.key().as_ref()],
        bump,
        payer = disputer,
        token::mint = collateral_mint,
        token::authority = config,
    )]
    pub escrow: Account<'info, TokenAccount>,

    #[account(mut)]
    pub disputer: Signer<'info>,

    /// CHECK: checked against config
    #[account(address = config.oracle_program @ DisputeError::InvalidAccount)]
    pub oracle_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_open_dispute(ctx: Context<OpenDispute>, requested: Outcome, reason: String) -> Result<()> {
    let config = &ctx.accounts.config;
    let oracle_key = ctx.accounts.oracle.key();
    let now = Clock::get()?.unix_timestamp;

    let oracle_state = OracleState::load(&ctx.accounts.oracle, &config.oracle_program)?;
    let market = market_for_oracle(
        &oracle_key,
        &ctx.accounts.oracle_market,
        &ctx.accounts.market,
        &config.market_factory_program,
        &config.market_program,
    )?;
    require_keys_eq!(market.collateral_mint, ctx.accounts.collateral_mint.key(), DisputeError::InvalidMint);

    let deposit = DisputeRecord::required_collateral(market.collateral_tvl);
    let end_at = DisputeRecord::voting_end(now, oracle_state.arbitration_escalation_epochs)?;

    let dispute = &mut ctx.accounts.dispute;
    dispute.open(
        OpenRequest {
            oracle: oracle_key,
            disputer: ctx.accounts.disputer.key(),
            oracle_finalized: oracle_state.is_finalized,
            current_status: oracle_state.status,
            requested,
            reason,
            deposit,
            market_mint: market.collateral_mint,
            end_at,
        },
        now,
    )?;
    dispute.bump = ctx.bumps.dispute;

    // Deposit into escrow
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.disputer_token_account.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
                authority: ctx.accounts.disputer.to_account_info(),
            },
        ),
        deposit,
    )?;

    let bump = [config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
    start_arbitration(
        ArbitrationAccounts {
            oracle_program: ctx.accounts.oracle_program.to_account_info(),
            oracle: ctx.accounts.oracle.to_account_info(),
            arbitrator: config.to_account_info(),
        },
        &[seeds],
    )?;

    emit!(DisputeCreated {
        oracle: oracle_key,
        disputer: dispute.disputer,
        draft_status: dispute.draft_status,
        deposit,
        market_mint: dispute.market_mint,
        end_at,
        reason: dispute.reason.clone(),
    });

    Ok(())
}
