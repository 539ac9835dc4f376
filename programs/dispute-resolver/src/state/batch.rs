use anchor_lang::prelude::*;
use crate::errors::DisputeError;
use crate::state::dispute::{DisputeRecord, Outcome};
use crate::state::relay::RelayReport;
use crate::state::vote_record::VoteRecord;

/// One token id's vote as it will be counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub option: Outcome,
    pub token_id: u64,
    pub power: u64,
    pub voter: Pubkey,
}

/// Votes from one instruction or one relayed message, applied to a single dispute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteBatch {
    pub power: u64,
    pub counted: Vec<u64>,
    pub report: RelayReport,
}

impl VoteBatch {
    /// Counts `ballot` if its vote record slot is free.
    ///
    /// `slot` is the bump of the unused vote record PDA, `None` once the token
    /// has voted on this dispute. Returns the bump to create the record with,
    /// or `None` when the ballot was skipped.
    pub fn apply(&mut self, dispute: &mut DisputeRecord, ballot: &Ballot, slot: Option<u8>) -> Result<Option<u8>> {
        let Some(bump) = slot else {
            self.report.skipped();
            return Ok(None);
        };

        dispute.add_votes(ballot.option, ballot.power)?;
        self.power = self.power.checked_add(ballot.power).ok_or(DisputeError::MathOverflow)?;
        self.counted.push(ballot.token_id);
        self.report.applied();
        Ok(Some(bump))
    }

    /// A direct vote has to count for something.
    pub fn require_counted(&self) -> Result<()> {
        require!(self.power > 0, DisputeError::NoValidVotes);
        Ok(())
    }
}

/// Vote reward claims from one instruction or one relayed message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimBatch {
    pub total: u64,
    pub report: RelayReport,
}

impl ClaimBatch {
    /// Marks `record` claimed and adds its reward. Fails if it was already claimed.
    pub fn settle(&mut self, dispute: &DisputeRecord, record: &mut VoteRecord) -> Result<u64> {
        let amount = dispute.reward_for(record.power)?;
        record.mark_claimed()?;
        self.total = self.total.checked_add(amount).ok_or(DisputeError::MathOverflow)?;
        self.report.applied();
        Ok(amount)
    }

    /// Relayed variant: a token that never voted (`None`) or already claimed is skipped.
    pub fn settle_or_skip(&mut self, dispute: &DisputeRecord, record: Option<&mut VoteRecord>) -> Result<Option<u64>> {
        match record {
            Some(record) if !record.claimed => self.settle(dispute, record).map(Some),
            _ => {
                self.report.skipped();
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::dispute::{DisputeState, OpenRequest};

    const NOW: i64 = 1_700_000_000;

    fn code<T>(res: Result<T>) -> u32 {
        match res {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    fn active() -> DisputeRecord {
        let mut d = DisputeRecord {
            oracle: Pubkey::default(),
            disputer: Pubkey::default(),
            state: DisputeState::NotActive,
            draft_status: Outcome::Pending,
            final_status: Outcome::Pending,
            deposit: 0,
            reward_pool: 0,
            end_at: 0,
            market_mint: Pubkey::default(),
            reason: String::new(),
            collateral_taken: false,
            votes: [0; 3],
            created_at: 0,
            resolved_at: None,
            bump: 255,
        };
        d.open(
            OpenRequest {
                oracle: Pubkey::new_unique(),
                disputer: Pubkey::new_unique(),
                oracle_finalized: false,
                current_status: Outcome::Yes,
                requested: Outcome::No,
                reason: String::new(),
                deposit: 100_000_000,
                market_mint: Pubkey::new_unique(),
                end_at: NOW + 1_000,
            },
            NOW,
        )
        .unwrap();
        d
    }

    fn ballot(token_id: u64, power: u64) -> Ballot {
        Ballot { option: Outcome::No, token_id, power, voter: Pubkey::new_unique() }
    }

    fn record(token_id: u64, power: u64) -> VoteRecord {
        VoteRecord {
            oracle: Pubkey::default(),
            token_id,
            voter: Pubkey::new_unique(),
            power,
            voted_for: Outcome::No,
            claimed: false,
            bump: 255,
        }
    }

    #[test]
    fn voted_token_is_skipped() {
        let mut dispute = active();
        let mut batch = VoteBatch::default();

        assert_eq!(batch.apply(&mut dispute, &ballot(1, 300), Some(254)).unwrap(), Some(254));
        assert_eq!(batch.apply(&mut dispute, &ballot(2, 500), None).unwrap(), None);

        assert_eq!(dispute.vote_count(Outcome::No), 300);
        assert_eq!(batch.power, 300);
        assert_eq!(batch.counted, vec![1]);
        assert_eq!(batch.report, RelayReport { applied: 1, skipped: 1 });
        assert!(batch.require_counted().is_ok());
    }

    #[test]
    fn all_skipped_counts_nothing() {
        let mut dispute = active();
        let mut batch = VoteBatch::default();
        batch.apply(&mut dispute, &ballot(1, 300), None).unwrap();
        batch.apply(&mut dispute, &ballot(2, 500), None).unwrap();

        assert_eq!(code(batch.require_counted()), u32::from(DisputeError::NoValidVotes));
        assert_eq!(dispute.total_votes().unwrap(), 0);
    }

    #[test]
    fn repeated_vote_delivery_is_idempotent() {
        let mut dispute = active();
        let ballots = [ballot(1, 300), ballot(2, 700)];

        let mut first = VoteBatch::default();
        for b in &ballots {
            first.apply(&mut dispute, b, Some(255)).unwrap();
        }
        // Records now exist, so a redelivery finds no free slot
        let mut second = VoteBatch::default();
        for b in &ballots {
            second.apply(&mut dispute, b, None).unwrap();
        }

        assert_eq!(first.report, RelayReport { applied: 2, skipped: 0 });
        assert_eq!(second.report, RelayReport { applied: 0, skipped: 2 });
        assert_eq!(dispute.vote_count(Outcome::No), 1_000);
    }

    #[test]
    fn repeated_claim_delivery_pays_once() {
        let mut dispute = active();
        dispute.add_votes(Outcome::No, 1_000).unwrap();
        dispute.resolve(dispute.end_at).unwrap();

        let mut alice = record(1, 200);
        let mut bob = record(2, 800);

        let mut first = ClaimBatch::default();
        assert_eq!(first.settle_or_skip(&dispute, Some(&mut alice)).unwrap(), Some(16_000_000));
        assert_eq!(first.settle_or_skip(&dispute, Some(&mut bob)).unwrap(), Some(64_000_000));
        assert_eq!(first.settle_or_skip(&dispute, None).unwrap(), None);
        assert_eq!(first.total, 80_000_000);
        assert_eq!(first.report, RelayReport { applied: 2, skipped: 1 });

        let mut second = ClaimBatch::default();
        assert_eq!(second.settle_or_skip(&dispute, Some(&mut alice)).unwrap(), None);
        assert_eq!(second.settle_or_skip(&dispute, Some(&mut bob)).unwrap(), None);
        assert_eq!(second.total, 0);
        assert_eq!(second.report, RelayReport { applied: 0, skipped: 2 });
    }

    #[test]
    fn direct_claim_rejects_second_settle() {
        let mut dispute = active();
        dispute.add_votes(Outcome::No, 100).unwrap();
        dispute.resolve(dispute.end_at).unwrap();

        let mut r = record(1, 100);
        let mut batch = ClaimBatch::default();
        batch.settle(&dispute, &mut r).unwrap();
        assert_eq!(code(batch.settle(&dispute, &mut r)), u32::from(DisputeError::AlreadyClaimedForTokenId));
        assert_eq!(batch.total, 80_000_000);
    }
}
