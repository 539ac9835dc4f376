use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{DisputeRecord, ResolverConfig, Resolution};
use crate::events::{DisputeFailed, DisputeResolved};
use crate::errors::DisputeError;
use crate::interfaces::fee_vault::{top_up_rewards, FeeVault, TopUpAccounts};
use crate::interfaces::oracle::{resolve_arbitration, ArbitrationAccounts};
use crate::interfaces::ExternalAccount;

#[derive(Accounts)]
#[instruction(oracle: Pubkey)]
pub struct ResolveDispute<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        mut,
        seeds = [DISPUTE_SEED, oracle.as_ref()],
        bump = dispute.bump,
    )]
    pub dispute: Account<'info, DisputeRecord>,

    /// CHECK: the disputed oracle
    #[account(mut, address = oracle @ DisputeError::InvalidAccount)]
    pub oracle_account: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, dispute.market_mint.as_ref()],
        bump,
    )]
    pub escrow: Account<'info, TokenAccount>,

    /// CHECK: owner and layout checked when loaded as a FeeVault
    #[account(mut, address = config.fee_vault @ DisputeError::InvalidAccount)]
    pub fee_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub fee_vault_token_account: Account<'info, TokenAccount>,

    /// Anyone may resolve once voting has ended
    pub resolver: Signer<'info>,

    /// CHECK: checked against config
    #[account(address = config.oracle_program @ DisputeError::InvalidAccount)]
    pub oracle_program: UncheckedAccount<'info>,

    /// CHECK: checked against config
    #[account(address = config.fee_vault_program @ DisputeError::InvalidAccount)]
    pub fee_vault_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_resolve(ctx: Context<ResolveDispute>, oracle: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let resolution = ctx.accounts.dispute.resolve(now)?;

    let accounts = &ctx.accounts;
    let dispute = &accounts.dispute;
    let bump = [accounts.config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
    let signer = &[seeds];

    let (winner, reason) = match resolution {
        Resolution::Failed => {
            msg!("dispute on {} tied", oracle);
            emit!(DisputeFailed { oracle, disputer: dispute.disputer });
            return Ok(());
        }
        Resolution::DisputerWon { winner, .. } => (winner, dispute.reason.clone()),
        Resolution::DisputerLost { winner, .. } => (winner, String::new()),
    };

    let vault = FeeVault::load(&accounts.fee_vault, &accounts.config.fee_vault_program)?;
    vault.require_fee_account(&accounts.fee_vault_token_account.to_account_info())?;

    resolve_arbitration(
        ArbitrationAccounts {
            oracle_program: accounts.oracle_program.to_account_info(),
            oracle: accounts.oracle_account.to_account_info(),
            arbitrator: accounts.config.to_account_info(),
        },
        winner,
        reason,
        signer,
    )?;

    match resolution {
        Resolution::DisputerWon { top_up, .. } => top_up_rewards(
            TopUpAccounts {
                fee_vault_program: accounts.fee_vault_program.to_account_info(),
                fee_vault: accounts.fee_vault.to_account_info(),
                fee_account: accounts.fee_vault_token_account.to_account_info(),
                destination: accounts.escrow.to_account_info(),
                caller: accounts.config.to_account_info(),
                token_program: accounts.token_program.to_account_info(),
            },
            top_up,
            signer,
        )?,
        Resolution::DisputerLost { protocol_fee, .. } => token::transfer(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                Transfer {
                    from: accounts.escrow.to_account_info(),
                    to: accounts.fee_vault_token_account.to_account_info(),
                    authority: accounts.config.to_account_info(),
                },
                signer,
            ),
            protocol_fee,
        )?,
        Resolution::Failed => {}
    }

    emit!(DisputeResolved {
        oracle,
        final_status: winner,
        resolver: accounts.resolver.key(),
    });

    Ok(())
}
