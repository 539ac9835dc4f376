use anchor_lang::prelude::*;
use dispute_resolver::constants::*;
use dispute_resolver::errors::DisputeError;
use dispute_resolver::interfaces::staking::StakePosition;
use dispute_resolver::state::*;

const NOW: i64 = 1_700_000_000;
const HOUR: i64 = 60 * 60;
const USDC: u64 = 1_000_000;

fn code<T>(res: Result<T>) -> u32 {
    match res {
        Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("expected an error"),
    }
}

fn staked(token_id: u64, amount: u64) -> StakePosition {
    StakePosition {
        token_id,
        nft_mint: Pubkey::new_unique(),
        amount,
        pool_id: REQUIRED_POOL_ID,
        locked_until: NOW + 365 * 24 * HOUR,
        pending_rewards: 0,
    }
}

fn wrapped(owner: Pubkey, token_id: u64, amount: u64) -> VotingNft {
    VotingNft::wrap(&staked(token_id, amount), owner, REQUIRED_POOL_ID, DEFAULT_VOTE_COOLDOWN, NOW, 255).unwrap()
}

fn new_dispute() -> DisputeRecord {
    DisputeRecord {
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
    }
}

fn open(disputer: Pubkey, requested: Outcome, opened_at: i64, tvl: u64) -> DisputeRecord {
    let mut dispute = new_dispute();
    dispute
        .open(
            OpenRequest {
                oracle: Pubkey::new_unique(),
                disputer,
                oracle_finalized: false,
                current_status: Outcome::Yes,
                requested,
                reason: "resolution source disagrees".to_string(),
                deposit: DisputeRecord::required_collateral(tvl),
                market_mint: Pubkey::new_unique(),
                end_at: DisputeRecord::voting_end(opened_at, 432).unwrap(),
            },
            opened_at,
        )
        .unwrap();
    dispute
}

/// Applies one vote the way the vote instruction does for a single token id.
fn cast(dispute: &mut DisputeRecord, nft: &mut VotingNft, option: Outcome, now: i64) -> Result<VoteRecord> {
    dispute.is_accepting_votes(now)?;
    nft.check_vote(now)?;
    nft.lock_after_vote(now, DEFAULT_UNWRAP_COOLDOWN)?;

    let ballot = Ballot { option, token_id: nft.token_id, power: nft.power, voter: nft.owner };
    let mut batch = VoteBatch::default();
    let bump = batch.apply(dispute, &ballot, Some(255))?.unwrap_or(255);
    batch.require_counted()?;
    Ok(VoteRecord {
        oracle: dispute.oracle,
        token_id: ballot.token_id,
        voter: ballot.voter,
        power: ballot.power,
        voted_for: option,
        claimed: false,
        bump,
    })
}

#[test]
fn disputer_wins_and_voters_split_the_pool() {
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let disputer = Pubkey::new_unique();

    let mut alice_nft = wrapped(alice, 1, 200);
    let mut bob_nft = wrapped(bob, 2, 1_000);
    let vote_at = NOW + DEFAULT_VOTE_COOLDOWN + 1;

    // Market with 10k USDC of collateral: 100 USDC deposit
    let mut dispute = open(disputer, Outcome::No, vote_at, 10_000 * USDC);
    assert_eq!(dispute.deposit, 100 * USDC);

    let mut alice_vote = cast(&mut dispute, &mut alice_nft, Outcome::Yes, vote_at).unwrap();
    let mut bob_vote = cast(&mut dispute, &mut bob_nft, Outcome::No, vote_at).unwrap();

    // Votes freeze the NFTs until the unwrap cooldown has passed
    let stranger = Pubkey::new_unique();
    assert_eq!(
        code(alice_nft.transfer(&alice, stranger, vote_at + 1)),
        u32::from(DisputeError::NftLockedDisputeResolution)
    );

    let resolution = dispute.resolve(dispute.end_at).unwrap();
    assert_eq!(
        resolution,
        Resolution::DisputerWon { winner: Outcome::No, top_up: 80 * USDC }
    );

    let alice_reward = dispute.reward_for(alice_vote.power).unwrap();
    let bob_reward = dispute.reward_for(bob_vote.power).unwrap();
    assert_eq!(alice_reward, 13_333_333);
    assert_eq!(bob_reward, 66_666_666);

    alice_vote.mark_claimed().unwrap();
    bob_vote.mark_claimed().unwrap();
    assert_eq!(code(bob_vote.mark_claimed()), u32::from(DisputeError::AlreadyClaimedForTokenId));

    // The disputer was right and gets the deposit back once
    let release = dispute.take_collateral(&disputer, dispute.end_at).unwrap();
    assert_eq!(release.amount, 100 * USDC);
    assert_eq!(code(dispute.take_collateral(&disputer, dispute.end_at)), u32::from(DisputeError::AlreadyTaken));
}

#[test]
fn losing_disputer_funds_fee_and_pool() {
    let disputer = Pubkey::new_unique();
    let voter = Pubkey::new_unique();
    let mut nft = wrapped(voter, 3, 500);
    let vote_at = NOW + DEFAULT_VOTE_COOLDOWN + 1;

    let mut dispute = open(disputer, Outcome::No, vote_at, 0);
    assert_eq!(dispute.deposit, MINIMUM_COLLATERAL);

    let record = cast(&mut dispute, &mut nft, Outcome::Yes, vote_at).unwrap();
    let resolution = dispute.resolve(dispute.end_at).unwrap();

    let Resolution::DisputerLost { winner, protocol_fee } = resolution else {
        panic!("disputer should have lost");
    };
    assert_eq!(winner, Outcome::Yes);
    assert_eq!(protocol_fee + dispute.reward_pool, dispute.deposit);
    assert_eq!(dispute.reward_for(record.power).unwrap(), dispute.reward_pool);
    assert_eq!(
        code(dispute.take_collateral(&disputer, dispute.end_at)),
        u32::from(DisputeError::CannotClaimCollateral)
    );
}

#[test]
fn freshly_wrapped_nft_waits_out_the_cooldown() {
    let owner = Pubkey::new_unique();
    let mut nft = wrapped(owner, 4, 100);
    let mut dispute = open(Pubkey::new_unique(), Outcome::No, NOW, 0);

    assert!(!nft.can_vote(NOW));
    assert_eq!(
        code(cast(&mut dispute, &mut nft, Outcome::No, NOW + HOUR)),
        u32::from(DisputeError::NftLockedVotingCooldown)
    );
    assert_eq!(dispute.total_votes().unwrap(), 0);
}

#[test]
fn penalty_blocks_the_token_until_paid() {
    let owner = Pubkey::new_unique();
    let mut nft = wrapped(owner, 5, 100);
    let after_cooldown = NOW + DEFAULT_UNWRAP_COOLDOWN;
    assert!(nft.can_unstake(after_cooldown));

    nft.set_penalty(25 * USDC, Pubkey::new_unique());
    assert!(!nft.can_unstake(after_cooldown));
    assert_eq!(code(nft.check_unwrap(&owner, after_cooldown)), u32::from(DisputeError::TokenBlocked));
    assert_eq!(code(nft.require_no_penalty()), u32::from(DisputeError::TokenBlocked));

    let due = nft.settle_penalty().unwrap();
    assert_eq!(due.amount, 25 * USDC);
    assert!(nft.check_unwrap(&owner, after_cooldown).is_ok());
    assert_eq!(code(nft.settle_penalty()), u32::from(DisputeError::NoPenalty));
}

#[test]
fn relayed_vote_carries_home_snapshot() {
    let voter = Pubkey::new_unique();
    let oracle = Pubkey::new_unique();
    let message = RelayMessage::Vote(VoteRequest {
        oracle,
        option: Outcome::Unknown,
        token_ids: vec![11, 12],
        powers: vec![300, 700],
        voter,
    });

    let bytes = message.encode().unwrap();
    assert_eq!(bytes[0], MSG_VOTE_REQUEST);

    let RelayMessage::Vote(req) = RelayMessage::decode(&bytes).unwrap() else {
        panic!("expected a vote request");
    };
    assert_eq!(req.voter, voter);
    assert_eq!(req.oracle, oracle);

    // Remote applies the carried powers without consulting any registry.
    // Token 12 already has a record there, so only token 11 counts.
    let mut dispute = open(Pubkey::new_unique(), Outcome::Unknown, NOW, 0);
    let slots = [Some(254), None];
    let mut batch = VoteBatch::default();
    for ((token_id, power), slot) in req.token_ids.iter().zip(&req.powers).zip(slots) {
        let ballot = Ballot { option: req.option, token_id: *token_id, power: *power, voter: req.voter };
        batch.apply(&mut dispute, &ballot, slot).unwrap();
    }
    assert_eq!(dispute.vote_count(Outcome::Unknown), 300);
    assert_eq!(batch.counted, vec![11]);
    assert_eq!(batch.report, RelayReport { applied: 1, skipped: 1 });

    // Redelivery of the same message finds both records written
    let mut again = VoteBatch::default();
    for (token_id, power) in req.token_ids.iter().zip(&req.powers) {
        let ballot = Ballot { option: req.option, token_id: *token_id, power: *power, voter: req.voter };
        again.apply(&mut dispute, &ballot, None).unwrap();
    }
    assert_eq!(again.report, RelayReport { applied: 0, skipped: 2 });
    assert_eq!(dispute.vote_count(Outcome::Unknown), 300);
}

#[test]
fn vote_rewards_follow_the_nft_owner() {
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let disputer = Pubkey::new_unique();
    let mut nft = wrapped(alice, 21, 400);
    let vote_at = NOW + DEFAULT_VOTE_COOLDOWN + 1;

    let mut dispute = open(disputer, Outcome::No, vote_at, 0);
    let mut record = cast(&mut dispute, &mut nft, Outcome::No, vote_at).unwrap();
    dispute.resolve(dispute.end_at).unwrap();

    let transfer_at = dispute.end_at.max(vote_at + DEFAULT_UNWRAP_COOLDOWN);
    nft.transfer(&alice, bob, transfer_at).unwrap();

    // The record still names the voter, but the claim goes to whoever holds the token now
    assert_eq!(record.voter, alice);
    assert_eq!(code(nft.require_owner_or_approved(&alice)), u32::from(DisputeError::NotNftOwnerOrApproved));
    nft.require_owner_or_approved(&bob).unwrap();

    let mut claims = ClaimBatch::default();
    assert_eq!(claims.settle(&dispute, &mut record).unwrap(), dispute.reward_pool);
    assert_eq!(
        code(claims.settle(&dispute, &mut record)),
        u32::from(DisputeError::AlreadyClaimedForTokenId)
    );
}

#[test]
fn relayed_requests_for_inactive_disputes_are_skipped() {
    let dispute = new_dispute();
    assert_eq!(code(dispute.is_accepting_votes(NOW)), u32::from(DisputeError::DisputeNotActive));
    assert_eq!(RelayReport::skip_all(3), RelayReport { applied: 0, skipped: 3 });

    let claim = RelayMessage::ClaimRewards(ClaimRewardsRequest {
        oracle: Pubkey::new_unique(),
        token_ids: vec![],
        voter: Pubkey::new_unique(),
    });
    assert_eq!(code(claim.validate()), u32::from(DisputeError::EmptyTokenIdsArray));
}
