use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::DisputeError;
use crate::utils::math::{bps_of, pro_rata};

/// Oracle outcome. `Pending` means the oracle has not reported yet and is never
/// a valid dispute target or vote choice.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Outcome {
    Pending,
    Yes,
    No,
    Unknown,
}

impl Outcome {
    pub const VOTABLE: [Outcome; 3] = [Outcome::Yes, Outcome::No, Outcome::Unknown];

    pub fn tally_index(self) -> Option<usize> {
        match self {
            Outcome::Pending => None,
            Outcome::Yes => Some(0),
            Outcome::No => Some(1),
            Outcome::Unknown => Some(2),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum DisputeState {
    NotActive,
    Active,
    Resolved,
    Failed,
}

#[account]
pub struct DisputeRecord {
    pub oracle: Pubkey,
    pub disputer: Pubkey,
    pub state: DisputeState,
    /// Outcome the disputer claims is correct
    pub draft_status: Outcome,
    pub final_status: Outcome,
    pub deposit: u64,
    pub reward_pool: u64,
    pub end_at: i64,
    pub market_mint: Pubkey,
    pub reason: String,            // max 200 bytes
    pub collateral_taken: bool,
    pub votes: [u128; 3],          // indexed by Outcome::tally_index
    pub created_at: i64,
    pub resolved_at: Option<i64>,
    pub bump: u8,
}

/// Everything `open` needs to know about the oracle and the disputer's request.
pub struct OpenRequest {
    pub oracle: Pubkey,
    pub disputer: Pubkey,
    pub oracle_finalized: bool,
    pub current_status: Outcome,
    pub requested: Outcome,
    pub reason: String,
    pub deposit: u64,
    pub market_mint: Pubkey,
    pub end_at: i64,
}

/// Money movements owed once a dispute leaves `Active` through voting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Tie on the top tally, nobody is paid and the deposit is refundable
    Failed,
    /// Fee vault tops the escrow up by `top_up`, which becomes the reward pool
    DisputerWon { winner: Outcome, top_up: u64 },
    /// `protocol_fee` leaves the escrow for the fee vault, the rest of the deposit is the reward pool
    DisputerLost { winner: Outcome, protocol_fee: u64 },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CollateralRelease {
    pub amount: u64,
    /// Set when the dispute expired with no votes and was failed by this call
    pub failed_now: bool,
}

impl DisputeRecord {
    // 8 discriminator + 32 oracle + 32 disputer + 1 state + 1 + 1 statuses
    // + 8 deposit + 8 reward pool + 8 end + 32 mint + (4 + 200) reason
    // + 1 taken + 3 * 16 votes + 8 created + 9 resolved + 1 bump
    pub const LEN: usize =
        8 + 32 + 32 + 1 + 1 + 1 + 8 + 8 + 8 + 32 + (4 + MAX_REASON_LENGTH) + 1 + 3 * 16 + 8 + 9 + 1;

    pub fn address(oracle: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[DISPUTE_SEED, oracle.as_ref()], &crate::ID)
    }

    /// Deposit for a market holding `tvl` of collateral: 1% of TVL with a floor.
    pub fn required_collateral(tvl: u64) -> u64 {
        (tvl / COLLATERAL_TVL_DIVISOR).max(MINIMUM_COLLATERAL)
    }

    /// Voting closes `APPLY_BUFFER` before the oracle's escalation window does,
    /// leaving time to push the result back to the oracle.
    pub fn voting_end(now: i64, escalation_epochs: u64) -> Result<i64> {
        let epochs = i64::try_from(escalation_epochs).map_err(|_| DisputeError::MathOverflow)?;
        let window = epochs.checked_mul(EPOCH_LENGTH).ok_or(DisputeError::MathOverflow)?;
        now.checked_add(window)
            .and_then(|t| t.checked_sub(APPLY_BUFFER))
            .ok_or(DisputeError::MathOverflow.into())
    }

    pub fn open(&mut self, req: OpenRequest, now: i64) -> Result<()> {
        // Guards
        require!(self.state == DisputeState::NotActive, DisputeError::DisputeAlreadyOpened);
        require!(req.requested != Outcome::Pending, DisputeError::CannotDisputeWithPendingStatus);
        require!(req.reason.len() <= MAX_REASON_LENGTH, DisputeError::ReasonTooLong);
        require!(
            !req.oracle_finalized
                && req.current_status != Outcome::Pending
                && req.current_status != req.requested,
            DisputeError::MarketState
        );

        self.oracle = req.oracle;
        self.disputer = req.disputer;
        self.state = DisputeState::Active;
        self.draft_status = req.requested;
        self.final_status = Outcome::Pending;
        self.deposit = req.deposit;
        self.reward_pool = 0;
        self.end_at = req.end_at;
        self.market_mint = req.market_mint;
        self.reason = req.reason;
        self.collateral_taken = false;
        self.votes = [0; 3];
        self.created_at = now;
        self.resolved_at = None;
        Ok(())
    }

    pub fn is_accepting_votes(&self, now: i64) -> Result<()> {
        require!(self.state == DisputeState::Active, DisputeError::DisputeNotActive);
        require!(now < self.end_at, DisputeError::VotingPeriodEnded);
        Ok(())
    }

    pub fn add_votes(&mut self, option: Outcome, power: u64) -> Result<()> {
        let idx = option.tally_index().ok_or(DisputeError::CannotVoteForPending)?;
        self.votes[idx] = self.votes[idx]
            .checked_add(power as u128)
            .ok_or(DisputeError::MathOverflow)?;
        Ok(())
    }

    pub fn vote_count(&self, option: Outcome) -> u128 {
        option.tally_index().map(|i| self.votes[i]).unwrap_or(0)
    }

    pub fn total_votes(&self) -> Result<u128> {
        self.votes
            .iter()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
            .ok_or(DisputeError::MathOverflow.into())
    }

    /// Closes voting and decides the outcome. Caller performs the returned money movements.
    pub fn resolve(&mut self, now: i64) -> Result<Resolution> {
        // Guards
        require!(self.state == DisputeState::Active, DisputeError::DisputeNotActive);
        require!(now >= self.end_at, DisputeError::VotingPeriodNotEnded);

        let max = self.votes.iter().copied().max().unwrap_or(0);
        require!(max > 0, DisputeError::NoOneVoted);

        self.resolved_at = Some(now);

        let leaders = self.votes.iter().filter(|v| **v == max).count();
        if leaders > 1 {
            self.state = DisputeState::Failed;
            return Ok(Resolution::Failed);
        }

        let winner = Outcome::VOTABLE
            .into_iter()
            .find(|o| self.vote_count(*o) == max)
            .ok_or(DisputeError::NoOneVoted)?;

        self.state = DisputeState::Resolved;
        self.final_status = winner;
        self.reward_pool = bps_of(self.deposit, VOTERS_SHARE_BPS).ok_or(DisputeError::MathOverflow)?;

        if winner == self.draft_status {
            Ok(Resolution::DisputerWon { winner, top_up: self.reward_pool })
        } else {
            Ok(Resolution::DisputerLost {
                winner,
                protocol_fee: bps_of(self.deposit, PROTOCOL_FEE_BPS).ok_or(DisputeError::MathOverflow)?,
            })
        }
    }

    /// Releases the deposit back to the disputer.
    ///
    /// An active dispute whose voting period ended without a single vote can never
    /// be resolved, so it is failed here to let the disputer recover the deposit.
    pub fn take_collateral(&mut self, caller: &Pubkey, now: i64) -> Result<CollateralRelease> {
        require_keys_eq!(*caller, self.disputer, DisputeError::NotTheDisputer);
        require!(!self.collateral_taken, DisputeError::AlreadyTaken);

        let mut failed_now = false;
        if self.state == DisputeState::Active && now >= self.end_at && self.total_votes()? == 0 {
            self.state = DisputeState::Failed;
            self.resolved_at = Some(now);
            failed_now = true;
        }

        let refundable = match self.state {
            DisputeState::Failed => true,
            DisputeState::Resolved => self.final_status == self.draft_status,
            _ => false,
        };
        require!(refundable, DisputeError::CannotClaimCollateral);

        self.collateral_taken = true;
        Ok(CollateralRelease { amount: self.deposit, failed_now })
    }

    /// Share of the reward pool owed to a vote of `power`. Every cast vote counts
    /// toward the denominator, whichever option it backed.
    pub fn reward_for(&self, power: u64) -> Result<u64> {
        require!(self.state == DisputeState::Resolved, DisputeError::DisputeNotResolved);
        pro_rata(power, self.reward_pool, self.total_votes()?).ok_or(DisputeError::MathOverflow.into())
    }
}
