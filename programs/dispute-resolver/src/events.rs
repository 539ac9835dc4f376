use anchor_lang::prelude::*;
use crate::state::{Deployment, ExecutorOptions, Outcome};

#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub deployment: Deployment,
    pub local_eid: u32,
    pub home_eid: u32,
}

#[event]
pub struct CooldownUpdated {
    pub vote_cooldown: i64,
    pub unwrap_cooldown: i64,
}

#[event]
pub struct EnforcedOptionsSet {
    pub msg_type: u8,
    pub options: ExecutorOptions,
}

#[event]
pub struct PeerSet {
    pub eid: u32,
    pub peer: [u8; 32],
}

#[event]
pub struct NftWrapped {
    pub caller: Pubkey,
    pub recipient: Pubkey,
    pub token_id: u64,
    pub power: u64,
    pub valid_to: i64,
}

#[event]
pub struct NftUnwrapped {
    pub caller: Pubkey,
    pub recipient: Pubkey,
    pub token_id: u64,
}

#[event]
pub struct VotingNftTransferred {
    pub token_id: u64,
    pub from: Pubkey,
    pub to: Pubkey,
}

#[event]
pub struct VotingNftApproved {
    pub token_id: u64,
    pub owner: Pubkey,
    pub approved: Option<Pubkey>,
}

#[event]
pub struct PenaltyTokenSet {
    pub mint: Pubkey,
}

#[event]
pub struct PenaltySet {
    pub token_id: u64,
    pub amount: u64,
    pub mint: Pubkey,
}

#[event]
pub struct PenaltyPaid {
    pub token_id: u64,
    pub payer: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
}

#[event]
pub struct DisputeCreated {
    pub oracle: Pubkey,
    pub disputer: Pubkey,
    pub draft_status: Outcome,
    pub deposit: u64,
    pub market_mint: Pubkey,
    pub end_at: i64,
    pub reason: String,
}

#[event]
pub struct VoteCast {
    pub voter: Pubkey,
    pub oracle: Pubkey,
    pub option: Outcome,
    pub power: u64,
    pub token_ids: Vec<u64>,
}

#[event]
pub struct DisputeResolved {
    pub oracle: Pubkey,
    pub final_status: Outcome,
    pub resolver: Pubkey,
}

#[event]
pub struct DisputeFailed {
    pub oracle: Pubkey,
    pub disputer: Pubkey,
}

#[event]
pub struct CollateralTaken {
    pub disputer: Pubkey,
    pub oracle: Pubkey,
    pub amount: u64,
    pub market_mint: Pubkey,
}

#[event]
pub struct VoteRewardClaimed {
    pub voter: Pubkey,
    pub oracle: Pubkey,
    pub token_id: u64,
    pub amount: u64,
}

#[event]
pub struct StakeRewardClaimed {
    pub voter: Pubkey,
    pub token_id: u64,
    pub rewards: u64,
}

#[event]
pub struct RemoteVoteSent {
    pub dst_eid: u32,
    pub oracle: Pubkey,
    pub voter: Pubkey,
    pub option: Outcome,
    pub power: u64,
    pub token_ids: Vec<u64>,
    pub nonce: u64,
}

#[event]
pub struct RemoteClaimSent {
    pub dst_eid: u32,
    pub oracle: Pubkey,
    pub voter: Pubkey,
    pub token_ids: Vec<u64>,
    pub nonce: u64,
}

#[event]
pub struct RemoteRequestProcessed {
    pub src_eid: u32,
    pub nonce: u64,
    pub msg_type: u8,
    pub oracle: Pubkey,
    pub applied: u32,
    pub skipped: u32,
}
