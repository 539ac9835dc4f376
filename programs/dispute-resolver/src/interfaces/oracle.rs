use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use super::{instruction_data, ExternalAccount};
use crate::state::Outcome;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OracleState {
    pub is_finalized: bool,
    pub status: Outcome,
    pub arbitration_escalation_epochs: u64,
}

impl ExternalAccount for OracleState {
    const NAME: &'static str = "Oracle";
}

#[derive(AnchorSerialize, AnchorDeserialize)]
struct ResolveArbitrationArgs {
    status: Outcome,
    reason: String,
}

pub struct ArbitrationAccounts<'info> {
    pub oracle_program: AccountInfo<'info>,
    pub oracle: AccountInfo<'info>,
    /// Resolver config PDA, the oracle's registered arbitrator
    pub arbitrator: AccountInfo<'info>,
}

impl<'info> ArbitrationAccounts<'info> {
    fn instruction(&self, data: Vec<u8>) -> Instruction {
        Instruction {
            program_id: self.oracle_program.key(),
            accounts: vec![
                AccountMeta::new(self.oracle.key(), false),
                AccountMeta::new_readonly(self.arbitrator.key(), true),
            ],
            data,
        }
    }

    fn invoke(self, data: Vec<u8>, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let ix = self.instruction(data);
        invoke_signed(&ix, &[self.oracle, self.arbitrator, self.oracle_program], signer_seeds)?;
        Ok(())
    }
}

/// Freezes the oracle in arbitration until the dispute reports back.
pub fn start_arbitration(accounts: ArbitrationAccounts<'_>, signer_seeds: &[&[&[u8]]]) -> Result<()> {
    let data = instruction_data("start_arbitration", &())?;
    accounts.invoke(data, signer_seeds)
}

pub fn resolve_arbitration(
    accounts: ArbitrationAccounts<'_>,
    status: Outcome,
    reason: String,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let data = instruction_data("resolve_arbitration", &ResolveArbitrationArgs { status, reason })?;
    accounts.invoke(data, signer_seeds)
}
