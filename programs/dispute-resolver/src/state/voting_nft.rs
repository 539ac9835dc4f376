use anchor_lang::prelude::*;
use crate::constants::VOTING_NFT_SEED;
use crate::errors::DisputeError;
use crate::interfaces::staking::StakePosition;

/// Registry entry for a wrapped staking position.
///
/// `power` is copied from the staking position at wrap time and never re-read.
/// `unstake_available_at` doubles as the transfer lock: a vote pushes it forward
/// so the voting NFT cannot change hands while its vote is being counted.
#[account]
pub struct VotingNft {
    pub token_id: u64,
    pub owner: Pubkey,
    pub approved: Option<Pubkey>,
    pub position_mint: Pubkey,
    pub power: u64,
    pub vote_disabled_until: i64,
    pub unstake_available_at: i64,
    /// Staking lock expiry
    pub valid_to: i64,
    pub penalty: Penalty,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub struct Penalty {
    pub amount: u64,
    pub mint: Pubkey,
}

impl Penalty {
    pub fn is_outstanding(&self) -> bool {
        self.amount > 0
    }
}

impl VotingNft {
    // 8 discriminator + 8 token id + 32 owner + 33 approved + 32 position mint
    // + 8 power + 8 + 8 + 8 timestamps + 40 penalty + 1 bump
    pub const LEN: usize = 8 + 8 + 32 + 33 + 32 + 8 + 8 + 8 + 8 + (8 + 32) + 1;

    pub fn address(token_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VOTING_NFT_SEED, &token_id.to_le_bytes()], &crate::ID)
    }

    pub fn wrap(
        position: &StakePosition,
        owner: Pubkey,
        required_pool_id: u8,
        vote_cooldown: i64,
        now: i64,
        bump: u8,
    ) -> Result<Self> {
        let cooldown_end = now.checked_add(vote_cooldown).ok_or(DisputeError::MathOverflow)?;

        // Guards
        require!(position.locked_until > cooldown_end, DisputeError::StaleNft);
        require!(position.pool_id == required_pool_id, DisputeError::OnlyStakeForYear);

        Ok(Self {
            token_id: position.token_id,
            owner,
            approved: None,
            position_mint: position.nft_mint,
            power: position.amount,
            vote_disabled_until: cooldown_end,
            unstake_available_at: cooldown_end,
            valid_to: position.locked_until,
            penalty: Penalty::default(),
            bump,
        })
    }

    pub fn is_owner_or_approved(&self, who: &Pubkey) -> bool {
        self.owner == *who || self.approved.as_ref() == Some(who)
    }

    pub fn require_owner_or_approved(&self, who: &Pubkey) -> Result<()> {
        require!(self.is_owner_or_approved(who), DisputeError::NotNftOwnerOrApproved);
        Ok(())
    }

    pub fn require_no_penalty(&self) -> Result<()> {
        if self.penalty.is_outstanding() {
            msg!("token {} blocked by penalty of {}", self.token_id, self.penalty.amount);
            return err!(DisputeError::TokenBlocked);
        }
        Ok(())
    }

    pub fn can_vote(&self, now: i64) -> bool {
        self.vote_disabled_until < now && now <= self.valid_to
    }

    pub fn can_unstake(&self, now: i64) -> bool {
        now >= self.unstake_available_at && !self.penalty.is_outstanding()
    }

    /// Per-token eligibility for casting a vote at `now`.
    pub fn check_vote(&self, now: i64) -> Result<()> {
        require!(self.valid_to > now, DisputeError::NftExpiredInStakingContract);
        require!(self.vote_disabled_until <= now, DisputeError::NftLockedVotingCooldown);
        Ok(())
    }

    /// Voting re-locks the NFT even if it was already unlockable.
    pub fn lock_after_vote(&mut self, now: i64, unwrap_cooldown: i64) -> Result<()> {
        self.unstake_available_at = now.checked_add(unwrap_cooldown).ok_or(DisputeError::MathOverflow)?;
        Ok(())
    }

    pub fn check_unwrap(&self, caller: &Pubkey, now: i64) -> Result<()> {
        self.require_owner_or_approved(caller)?;
        require!(now >= self.unstake_available_at, DisputeError::TooEarly);
        self.require_no_penalty()
    }

    pub fn transfer(&mut self, caller: &Pubkey, new_owner: Pubkey, now: i64) -> Result<()> {
        self.require_owner_or_approved(caller)?;
        require!(now >= self.unstake_available_at, DisputeError::NftLockedDisputeResolution);

        self.owner = new_owner;
        self.approved = None;
        Ok(())
    }

    pub fn approve(&mut self, caller: &Pubkey, delegate: Option<Pubkey>) -> Result<()> {
        require_keys_eq!(*caller, self.owner, DisputeError::NotNftOwnerOrApproved);
        self.approved = delegate;
        Ok(())
    }

    pub fn set_penalty(&mut self, amount: u64, mint: Pubkey) {
        self.penalty = Penalty { amount, mint };
    }

    /// Clears the penalty and returns what has to be paid.
    pub fn settle_penalty(&mut self) -> Result<Penalty> {
        require!(self.penalty.is_outstanding(), DisputeError::NoPenalty);
        let due = self.penalty;
        self.penalty.amount = 0;
        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 60 * 60;
    const COOLDOWN: i64 = 60 * HOUR;
    const NOW: i64 = 1_700_000_000;

    fn position(locked_until: i64, pool_id: u8) -> StakePosition {
        StakePosition {
            token_id: 7,
            nft_mint: Pubkey::new_unique(),
            amount: 1_000,
            pool_id,
            locked_until,
            pending_rewards: 0,
        }
    }

    fn wrapped(owner: Pubkey) -> VotingNft {
        VotingNft::wrap(&position(NOW + 365 * 24 * HOUR, 2), owner, 2, COOLDOWN, NOW, 254).unwrap()
    }

    fn code<T>(res: Result<T>) -> u32 {
        match res {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn wrap_freezes_power_and_sets_cooldowns() {
        let owner = Pubkey::new_unique();
        let nft = wrapped(owner);
        assert_eq!(nft.token_id, 7);
        assert_eq!(nft.power, 1_000);
        assert_eq!(nft.vote_disabled_until, NOW + COOLDOWN);
        assert_eq!(nft.unstake_available_at, NOW + COOLDOWN);
        assert_eq!(nft.owner, owner);
        assert!(!nft.penalty.is_outstanding());
    }

    #[test]
    fn wrap_rejects_lock_ending_within_cooldown() {
        let owner = Pubkey::new_unique();
        let res = VotingNft::wrap(&position(NOW + COOLDOWN, 2), owner, 2, COOLDOWN, NOW, 1);
        assert_eq!(code(res), u32::from(DisputeError::StaleNft));

        assert!(VotingNft::wrap(&position(NOW + COOLDOWN + 1, 2), owner, 2, COOLDOWN, NOW, 1).is_ok());
    }

    #[test]
    fn wrap_rejects_wrong_pool() {
        let res = VotingNft::wrap(&position(NOW + 400 * 24 * HOUR, 1), Pubkey::new_unique(), 2, COOLDOWN, NOW, 1);
        assert_eq!(code(res), u32::from(DisputeError::OnlyStakeForYear));
    }

    #[test]
    fn vote_eligibility_follows_cooldown_and_expiry() {
        let nft = wrapped(Pubkey::new_unique());

        assert_eq!(code(nft.check_vote(NOW + HOUR)), u32::from(DisputeError::NftLockedVotingCooldown));
        assert!(!nft.can_vote(NOW + HOUR));

        assert!(nft.check_vote(NOW + COOLDOWN).is_ok());
        assert!(!nft.can_vote(NOW + COOLDOWN));
        assert!(nft.can_vote(NOW + COOLDOWN + 1));

        assert_eq!(code(nft.check_vote(nft.valid_to)), u32::from(DisputeError::NftExpiredInStakingContract));
        assert!(nft.can_vote(nft.valid_to));
        assert!(!nft.can_vote(nft.valid_to + 1));
    }

    #[test]
    fn vote_relocks_transfers_and_unwraps() {
        let owner = Pubkey::new_unique();
        let mut nft = wrapped(owner);
        let later = NOW + 10 * COOLDOWN;
        assert!(nft.can_unstake(later));

        nft.lock_after_vote(later, COOLDOWN).unwrap();
        assert!(!nft.can_unstake(later + 1));

        let res = nft.transfer(&owner, Pubkey::new_unique(), later + 1);
        assert_eq!(code(res), u32::from(DisputeError::NftLockedDisputeResolution));

        assert_eq!(code(nft.check_unwrap(&owner, later + 1)), u32::from(DisputeError::TooEarly));

        assert!(nft.check_unwrap(&owner, later + COOLDOWN).is_ok());
    }

    #[test]
    fn transfer_moves_ownership_and_clears_approval() {
        let owner = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let mut nft = wrapped(owner);
        let unlocked = NOW + COOLDOWN;

        assert_eq!(code(nft.approve(&delegate, Some(delegate))), u32::from(DisputeError::NotNftOwnerOrApproved));

        nft.approve(&owner, Some(delegate)).unwrap();
        assert!(nft.is_owner_or_approved(&delegate));

        nft.transfer(&delegate, buyer, unlocked).unwrap();
        assert_eq!(nft.owner, buyer);
        assert_eq!(nft.approved, None);
        assert!(!nft.is_owner_or_approved(&owner));
        assert!(!nft.is_owner_or_approved(&delegate));
    }

    #[test]
    fn penalty_blocks_until_paid() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut nft = wrapped(owner);
        let unlocked = NOW + COOLDOWN;

        assert_eq!(code(nft.settle_penalty()), u32::from(DisputeError::NoPenalty));

        nft.set_penalty(500, mint);
        assert!(!nft.can_unstake(unlocked));
        assert_eq!(code(nft.check_unwrap(&owner, unlocked)), u32::from(DisputeError::TokenBlocked));

        let due = nft.settle_penalty().unwrap();
        assert_eq!(due, Penalty { amount: 500, mint });
        assert!(nft.can_unstake(unlocked));
        assert!(nft.check_unwrap(&owner, unlocked).is_ok());
    }

    #[test]
    fn serialized_nft_fits_len() {
        let mut nft = wrapped(Pubkey::new_unique());
        nft.approved = Some(Pubkey::new_unique());
        let mut buf = Vec::new();
        nft.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), VotingNft::LEN);
    }
}
