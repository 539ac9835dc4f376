use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use super::{instruction_data, ExternalAccount};

/// Staking program's position, keyed by the position NFT.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakePosition {
    pub token_id: u64,
    pub nft_mint: Pubkey,
    /// Staked amount, which is the position's voting power
    pub amount: u64,
    pub pool_id: u8,
    pub locked_until: i64,
    pub pending_rewards: u64,
}

impl ExternalAccount for StakePosition {
    const NAME: &'static str = "StakePosition";
}

pub struct ClaimRewardsAccounts<'info> {
    pub staking_program: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    /// Token account holding the position NFT
    pub position_nft_account: AccountInfo<'info>,
    /// Owner of `position_nft_account`; signs through the resolver config seeds
    pub holder: AccountInfo<'info>,
    pub reward_vault: AccountInfo<'info>,
    pub reward_vault_authority: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Pays the position's pending staking rewards to `destination`.
pub fn claim_rewards(accounts: ClaimRewardsAccounts<'_>, signer_seeds: &[&[&[u8]]]) -> Result<()> {
    let ix = Instruction {
        program_id: accounts.staking_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.position.key(), false),
            AccountMeta::new_readonly(accounts.position_nft_account.key(), false),
            AccountMeta::new_readonly(accounts.holder.key(), true),
            AccountMeta::new(accounts.reward_vault.key(), false),
            AccountMeta::new_readonly(accounts.reward_vault_authority.key(), false),
            AccountMeta::new(accounts.destination.key(), false),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: instruction_data("claim_rewards", &())?,
    };

    invoke_signed(
        &ix,
        &[
            accounts.position,
            accounts.position_nft_account,
            accounts.holder,
            accounts.reward_vault,
            accounts.reward_vault_authority,
            accounts.destination,
            accounts.token_program,
            accounts.staking_program,
        ],
        signer_seeds,
    )?;
    Ok(())
}
