use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{Deployment, ExecutorOptions, ResolverConfig};
use crate::events::ConfigInitialized;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitConfigParams {
    pub deployment: Deployment,
    pub local_eid: u32,
    pub home_eid: u32,
    pub staking_program: Pubkey,
    pub market_factory_program: Pubkey,
    pub market_program: Pubkey,
    pub oracle_program: Pubkey,
    pub fee_vault_program: Pubkey,
    pub fee_vault: Pubkey,
    pub endpoint_program: Pubkey,
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        seeds = [CONFIG_SEED],
        bump,
        payer = admin,
        space = ResolverConfig::LEN
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_init_config(ctx: Context<InitConfig>, params: InitConfigParams) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.deployment = params.deployment;
    config.local_eid = params.local_eid;
    config.home_eid = match params.deployment {
        Deployment::Home => params.local_eid,
        Deployment::Remote => params.home_eid,
    };
    config.staking_program = params.staking_program;
    config.market_factory_program = params.market_factory_program;
    config.market_program = params.market_program;
    config.oracle_program = params.oracle_program;
    config.fee_vault_program = params.fee_vault_program;
    config.fee_vault = params.fee_vault;
    config.endpoint_program = params.endpoint_program;
    config.required_pool_id = REQUIRED_POOL_ID;
    config.vote_cooldown = DEFAULT_VOTE_COOLDOWN;
    config.unwrap_cooldown = DEFAULT_UNWRAP_COOLDOWN;
    config.penalty_mint = None;
    config.enforced_vote_options = ExecutorOptions {
        compute_units: VOTE_REQUEST_COMPUTE_UNITS,
        native_drop: 0,
    };
    config.enforced_claim_options = ExecutorOptions {
        compute_units: CLAIM_REQUEST_COMPUTE_UNITS,
        native_drop: 0,
    };
    config.total_wrapped = 0;
    config.bump = ctx.bumps.config;

    emit!(ConfigInitialized {
        admin: config.admin,
        deployment: config.deployment,
        local_eid: config.local_eid,
        home_eid: config.home_eid,
    });

    Ok(())
}
