pub const CONFIG_SEED: &[u8] = b"config";
pub const VOTING_NFT_SEED: &[u8] = b"voting_nft";
pub const DISPUTE_SEED: &[u8] = b"dispute";
pub const VOTE_RECORD_SEED: &[u8] = b"vote_record";
pub const VOTE_HISTORY_SEED: &[u8] = b"vote_history";
/// Token account holding dispute deposits and reward pools for one collateral mint
pub const ESCROW_SEED: &[u8] = b"escrow";
/// Token account holding one wrapped staking position NFT
pub const CUSTODY_SEED: &[u8] = b"custody";
pub const PEER_SEED: &[u8] = b"peer";

pub const BPS: u64 = 10_000;
/// Share of a losing disputer's deposit sent to the fee vault
pub const PROTOCOL_FEE_BPS: u64 = 2_000;
/// Share of the deposit distributed to voters once a dispute resolves
pub const VOTERS_SHARE_BPS: u64 = 8_000;

/// Floor for the dispute deposit (1 unit of a 6-decimal collateral token)
pub const MINIMUM_COLLATERAL: u64 = 1_000_000;
/// Deposit is 1% of the market TVL
pub const COLLATERAL_TVL_DIVISOR: u64 = 100;

pub const MAX_REASON_LENGTH: usize = 200;

/// Oracle escalation epoch (5 minutes)
pub const EPOCH_LENGTH: i64 = 5 * 60;
/// Voting closes this long before the oracle's arbitration window does
pub const APPLY_BUFFER: i64 = 2 * 60 * 60;

pub const DEFAULT_VOTE_COOLDOWN: i64 = 60 * 60 * 60;
pub const DEFAULT_UNWRAP_COOLDOWN: i64 = 60 * 60 * 60;

/// Staking pool id of the one-year lock
pub const REQUIRED_POOL_ID: u8 = 2;

pub const MSG_VOTE_REQUEST: u8 = 1;
pub const MSG_CLAIM_REWARDS_REQUEST: u8 = 2;

pub const VOTE_REQUEST_COMPUTE_UNITS: u32 = 200_000;
pub const CLAIM_REQUEST_COMPUTE_UNITS: u32 = 250_000;

/// Bounded so a relayed message always fits in one transaction
pub const MAX_TOKEN_IDS_PER_MESSAGE: usize = 16;
