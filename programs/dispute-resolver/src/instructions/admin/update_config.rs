use anchor_lang::prelude::*;
use crate::constants::CONFIG_SEED;
use crate::state::{ExecutorOptions, ResolverConfig};
use crate::events::{CooldownUpdated, EnforcedOptionsSet, PenaltyTokenSet};
use crate::errors::DisputeError;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ DisputeError::Unauthorized
    )]
    pub config: Account<'info, ResolverConfig>,
    pub admin: Signer<'info>,
}

pub fn set_vote_cooldown(ctx: Context<UpdateConfig>, seconds: i64) -> Result<()> {
    require!(seconds >= 0, DisputeError::InvalidCooldown);
    let config = &mut ctx.accounts.config;
    config.vote_cooldown = seconds;

    emit!(CooldownUpdated {
        vote_cooldown: config.vote_cooldown,
        unwrap_cooldown: config.unwrap_cooldown,
    });
    Ok(())
}

pub fn set_unwrap_cooldown(ctx: Context<UpdateConfig>, seconds: i64) -> Result<()> {
    require!(seconds >= 0, DisputeError::InvalidCooldown);
    let config = &mut ctx.accounts.config;
    config.unwrap_cooldown = seconds;

    emit!(CooldownUpdated {
        vote_cooldown: config.vote_cooldown,
        unwrap_cooldown: config.unwrap_cooldown,
    });
    Ok(())
}

/// Mint that newly set penalties are denominated in. Existing penalties keep theirs.
pub fn set_penalty_token(ctx: Context<UpdateConfig>, mint: Pubkey) -> Result<()> {
    require_keys_neq!(mint, Pubkey::default(), DisputeError::InvalidMint);
    ctx.accounts.config.penalty_mint = Some(mint);

    emit!(PenaltyTokenSet { mint });
    Ok(())
}

pub fn set_enforced_options(ctx: Context<UpdateConfig>, msg_type: u8, options: ExecutorOptions) -> Result<()> {
    ctx.accounts.config.set_enforced_options(msg_type, options)?;

    emit!(EnforcedOptionsSet { msg_type, options });
    Ok(())
}
