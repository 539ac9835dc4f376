use anchor_lang::prelude::*;
use crate::constants::{VOTE_HISTORY_SEED, VOTE_RECORD_SEED};
use crate::errors::DisputeError;
use crate::state::dispute::Outcome;

/// One token id's vote on one oracle's dispute. Only `claimed` ever changes.
#[account]
pub struct VoteRecord {
    pub oracle: Pubkey,
    pub token_id: u64,
    /// Account that cast the vote; on Remote, the Home-chain voter
    pub voter: Pubkey,
    pub power: u64,
    pub voted_for: Outcome,
    pub claimed: bool,
    pub bump: u8,
}

impl VoteRecord {
    pub const LEN: usize = 8 + 32 + 8 + 32 + 8 + 1 + 1 + 1;

    pub fn address(oracle: &Pubkey, token_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[VOTE_RECORD_SEED, oracle.as_ref(), &token_id.to_le_bytes()],
            &crate::ID,
        )
    }

    pub fn mark_claimed(&mut self) -> Result<()> {
        require!(!self.claimed, DisputeError::AlreadyClaimedForTokenId);
        self.claimed = true;
        Ok(())
    }
}

/// Oracles a token id has voted on, in voting order.
#[account]
pub struct VoteHistory {
    pub token_id: u64,
    pub oracles: Vec<Pubkey>,
    pub bump: u8,
}

impl VoteHistory {
    pub const BASE_LEN: usize = 8 + 8 + 4 + 1;

    pub fn space_for(entries: usize) -> usize {
        Self::BASE_LEN + entries * 32
    }

    pub fn address(token_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VOTE_HISTORY_SEED, &token_id.to_le_bytes()], &crate::ID)
    }

    pub fn total(&self) -> u64 {
        self.oracles.len() as u64
    }

    /// `oracles[offset..offset + limit]`, clamped to the history length.
    pub fn page(&self, offset: u64, limit: u64) -> &[Pubkey] {
        let len = self.oracles.len();
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(usize::try_from(limit).unwrap_or(usize::MAX)).min(len);
        &self.oracles[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> (VoteHistory, Vec<Pubkey>) {
        let oracles: Vec<Pubkey> = (0..n).map(|_| Pubkey::new_unique()).collect();
        (VoteHistory { token_id: 1, oracles: oracles.clone(), bump: 255 }, oracles)
    }

    #[test]
    fn claim_flips_once() {
        let mut record = VoteRecord {
            oracle: Pubkey::new_unique(),
            token_id: 3,
            voter: Pubkey::new_unique(),
            power: 100,
            voted_for: Outcome::Yes,
            claimed: false,
            bump: 255,
        };
        record.mark_claimed().unwrap();
        assert!(record.claimed);
        match record.mark_claimed() {
            Err(anchor_lang::error::Error::AnchorError(e)) => {
                assert_eq!(e.error_code_number, u32::from(DisputeError::AlreadyClaimedForTokenId))
            }
            _ => panic!("second claim must fail"),
        }

        let mut buf = Vec::new();
        record.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), VoteRecord::LEN);
    }

    #[test]
    fn page_is_clamped_to_history() {
        let (h, oracles) = history(5);
        assert_eq!(h.total(), 5);
        assert_eq!(h.page(0, 2), &oracles[0..2]);
        assert_eq!(h.page(3, 10), &oracles[3..5]);
        assert!(h.page(5, 1).is_empty());
        assert!(h.page(99, 1).is_empty());
        assert!(h.page(2, 0).is_empty());
        assert_eq!(h.page(1, u64::MAX), &oracles[1..5]);
    }

    #[test]
    fn history_space_tracks_entries() {
        let (h, _) = history(3);
        let mut buf = Vec::new();
        h.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), VoteHistory::space_for(3));
    }
}
