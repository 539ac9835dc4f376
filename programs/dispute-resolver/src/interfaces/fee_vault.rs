use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use super::{instruction_data, ExternalAccount};
use crate::errors::DisputeError;

/// Protocol fee vault. Collects fees and funds voter rewards for approved callers.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeeVault {
    pub authority: Pubkey,
    /// Token account fees are paid into
    pub fee_account: Pubkey,
}

impl ExternalAccount for FeeVault {
    const NAME: &'static str = "FeeVault";
}

impl FeeVault {
    pub fn require_fee_account(&self, account: &AccountInfo) -> Result<()> {
        require_keys_eq!(account.key(), self.fee_account, DisputeError::InvalidAccount);
        Ok(())
    }
}

pub struct TopUpAccounts<'info> {
    pub fee_vault_program: AccountInfo<'info>,
    pub fee_vault: AccountInfo<'info>,
    pub fee_account: AccountInfo<'info>,
    pub destination: AccountInfo<'info>,
    /// Approved caller, the resolver config PDA
    pub caller: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Moves `amount` from the vault's fee account into `destination`.
pub fn top_up_rewards(accounts: TopUpAccounts<'_>, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
    let ix = Instruction {
        program_id: accounts.fee_vault_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.fee_vault.key(), false),
            AccountMeta::new(accounts.fee_account.key(), false),
            AccountMeta::new(accounts.destination.key(), false),
            AccountMeta::new_readonly(accounts.caller.key(), true),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: instruction_data("top_up_rewards", &amount)?,
    };

    invoke_signed(
        &ix,
        &[
            accounts.fee_vault,
            accounts.fee_account,
            accounts.destination,
            accounts.caller,
            accounts.token_program,
            accounts.fee_vault_program,
        ],
        signer_seeds,
    )?;
    Ok(())
}
