use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{Ballot, DisputeRecord, Outcome, ResolverConfig, VoteBatch, VoteHistory, VoteRecord, VotingNft};
use crate::events::VoteCast;
use crate::errors::DisputeError;
use crate::utils::accounts::{create_pda_account, grow, is_initialized, load, require_address, store};

/// `[voting_nft, vote_record, vote_history]`
pub const VOTE_ACCOUNTS_PER_TOKEN: usize = 3;

#[derive(Accounts)]
#[instruction(oracle: Pubkey)]
pub struct CastVote<'info> {
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

    /// Owner or approved operator of every voting NFT; pays for the vote records
    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Bump of the unused vote record PDA for `token_id`, or `None` if that id already voted.
pub fn vote_slot(record: &AccountInfo, oracle: &Pubkey, token_id: u64) -> Result<Option<u8>> {
    let (address, bump) = VoteRecord::address(oracle, token_id);
    require_address(record, &address)?;
    Ok(if is_initialized(record) { None } else { Some(bump) })
}

/// Writes the vote record of a counted ballot and appends `oracle` to the token's history.
pub fn record_vote<'info>(
    oracle: Pubkey,
    ballot: &Ballot,
    record_bump: u8,
    record: &AccountInfo<'info>,
    history: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let id_bytes = ballot.token_id.to_le_bytes();
    create_pda_account(
        payer,
        record,
        system_program,
        VoteRecord::LEN,
        &crate::ID,
        &[VOTE_RECORD_SEED, oracle.as_ref(), id_bytes.as_ref(), &[record_bump]],
    )?;
    store(
        record,
        &VoteRecord {
            oracle,
            token_id: ballot.token_id,
            voter: ballot.voter,
            power: ballot.power,
            voted_for: ballot.option,
            claimed: false,
            bump: record_bump,
        },
    )?;

    let (history_address, history_bump) = VoteHistory::address(ballot.token_id);
    require_address(history, &history_address)?;
    let mut entry = if is_initialized(history) {
        let entry: VoteHistory = load(history)?;
        grow(payer, history, system_program, VoteHistory::space_for(entry.oracles.len() + 1))?;
        entry
    } else {
        create_pda_account(
            payer,
            history,
            system_program,
            VoteHistory::space_for(1),
            &crate::ID,
            &[VOTE_HISTORY_SEED, id_bytes.as_ref(), &[history_bump]],
        )?;
        VoteHistory { token_id: ballot.token_id, oracles: Vec::new(), bump: history_bump }
    };
    entry.oracles.push(oracle);
    store(history, &entry)
}

pub fn process_vote<'info>(
    ctx: Context<'_, '_, '_, 'info, CastVote<'info>>,
    oracle: Pubkey,
    option: Outcome,
    token_ids: Vec<u64>,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    // Guards
    config.require_home()?;
    ctx.accounts.dispute.is_accepting_votes(now)?;
    require!(option != Outcome::Pending, DisputeError::CannotVoteForPending);
    require!(!token_ids.is_empty(), DisputeError::EmptyTokenIdsArray);
    require!(
        ctx.remaining_accounts.len() == token_ids.len() * VOTE_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let voter = ctx.accounts.voter.key();
    let payer = ctx.accounts.voter.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let unwrap_cooldown = config.unwrap_cooldown;
    let dispute = &mut ctx.accounts.dispute;

    let mut batch = VoteBatch::default();

    for (token_id, accounts) in token_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(VOTE_ACCOUNTS_PER_TOKEN))
    {
        let [voting_nft, record, history] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let mut nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.require_owner_or_approved(&voter)?;

        let ballot = Ballot { option, token_id: *token_id, power: nft.power, voter };
        let slot = vote_slot(record, &oracle, *token_id)?;
        let Some(record_bump) = batch.apply(dispute, &ballot, slot)? else {
            msg!("token {} already voted on {}", token_id, oracle);
            continue;
        };
        nft.check_vote(now)?;
        nft.lock_after_vote(now, unwrap_cooldown)?;
        store(voting_nft, &nft)?;

        record_vote(oracle, &ballot, record_bump, record, history, &payer, &system_program)?;
    }

    batch.require_counted()?;

    emit!(VoteCast {
        voter,
        oracle,
        option,
        power: batch.power,
        token_ids: batch.counted,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code<T>(res: Result<T>) -> u32 {
        match res {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn slot_is_free_until_record_is_written() {
        let oracle = Pubkey::new_unique();
        let (address, bump) = VoteRecord::address(&oracle, 7);
        let system = anchor_lang::system_program::ID;
        let program = crate::ID;

        let mut lamports = 0;
        let mut nothing: [u8; 0] = [];
        let fresh = AccountInfo::new(&address, false, true, &mut lamports, &mut nothing, &system, false, 0);
        assert_eq!(vote_slot(&fresh, &oracle, 7).unwrap(), Some(bump));

        let mut rent = 1_000_000;
        let mut data = vec![0u8; VoteRecord::LEN];
        let written = AccountInfo::new(&address, false, true, &mut rent, &mut data, &program, false, 0);
        assert_eq!(vote_slot(&written, &oracle, 7).unwrap(), None);
    }

    #[test]
    fn slot_rejects_record_of_another_token() {
        let oracle = Pubkey::new_unique();
        let (address, _) = VoteRecord::address(&oracle, 8);
        let system = anchor_lang::system_program::ID;

        let mut lamports = 0;
        let mut nothing: [u8; 0] = [];
        let info = AccountInfo::new(&address, false, true, &mut lamports, &mut nothing, &system, false, 0);
        assert_eq!(code(vote_slot(&info, &oracle, 7)), u32::from(DisputeError::InvalidAccount));
    }
}
