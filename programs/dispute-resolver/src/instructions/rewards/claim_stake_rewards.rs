use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use crate::constants::*;
use crate::state::{ResolverConfig, VotingNft};
use crate::events::StakeRewardClaimed;
use crate::errors::DisputeError;
use crate::interfaces::staking::{claim_rewards, ClaimRewardsAccounts, StakePosition};
use crate::interfaces::ExternalAccount;
use crate::utils::accounts::{load, require_address, token_account, token_received};

/// `[voting_nft, stake_position, custody_nft_account]`
pub const STAKE_CLAIM_ACCOUNTS_PER_TOKEN: usize = 3;

#[derive(Accounts)]
pub struct ClaimStakeRewards<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    pub claimer: Signer<'info>,

    /// CHECK: checked against config
    #[account(address = config.staking_program @ DisputeError::InvalidAccount)]
    pub staking_program: UncheckedAccount<'info>,

    /// CHECK: validated by the staking program
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    /// CHECK: validated by the staking program
    pub reward_vault_authority: UncheckedAccount<'info>,

    /// CHECK: rewards token account, validated by the staking program
    #[account(mut)]
    pub rewards_destination: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

/// Claims staking rewards for custodied positions on behalf of their voting NFT holders.
pub fn process_claim_stake_rewards<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimStakeRewards<'info>>,
    token_ids: Vec<u64>,
) -> Result<()> {
    let config = &ctx.accounts.config;

    // Guards
    config.require_home()?;
    require!(!token_ids.is_empty(), DisputeError::EmptyTokenIdsArray);
    require!(
        ctx.remaining_accounts.len() == token_ids.len() * STAKE_CLAIM_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let claimer = ctx.accounts.claimer.key();
    let bump = [config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];

    for (token_id, accounts) in token_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(STAKE_CLAIM_ACCOUNTS_PER_TOKEN))
    {
        let [voting_nft, stake_position, custody] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.require_owner_or_approved(&claimer)?;
        nft.require_no_penalty()?;

        let position = StakePosition::load(stake_position, &config.staking_program)?;
        require!(position.token_id == *token_id, DisputeError::InvalidAccount);

        let (custody_address, _) =
            Pubkey::find_program_address(&[CUSTODY_SEED, nft.position_mint.as_ref()], &crate::ID);
        require_address(custody, &custody_address)?;

        let destination = ctx.accounts.rewards_destination.to_account_info();
        let before = token_account(&destination)?.amount;

        claim_rewards(
            ClaimRewardsAccounts {
                staking_program: ctx.accounts.staking_program.to_account_info(),
                position: stake_position.clone(),
                position_nft_account: custody.clone(),
                holder: config.to_account_info(),
                reward_vault: ctx.accounts.reward_vault.to_account_info(),
                reward_vault_authority: ctx.accounts.reward_vault_authority.to_account_info(),
                destination: destination.clone(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            &[seeds],
        )?;

        let rewards = token_received(&destination, before)?;

        emit!(StakeRewardClaimed {
            voter: claimer,
            token_id: *token_id,
            rewards,
        });
    }

    Ok(())
}
