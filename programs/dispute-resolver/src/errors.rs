use anchor_lang::prelude::*;

#[error_code]
pub enum DisputeError {
    #[msg("Staking lock expires before the vote cooldown ends")]
    StaleNft,
    #[msg("Only positions staked for a year can be wrapped")]
    OnlyStakeForYear,
    #[msg("Staking position has expired")]
    NftExpiredInStakingContract,
    #[msg("Voting NFT is still in its vote cooldown")]
    NftLockedVotingCooldown,
    #[msg("Voting NFT is locked by dispute resolution")]
    NftLockedDisputeResolution,
    #[msg("Token id list is empty")]
    EmptyArray,
    #[msg("Token id list is empty")]
    EmptyTokenIdsArray,
    #[msg("Dispute is not active")]
    DisputeNotActive,
    #[msg("Dispute already opened for this oracle")]
    DisputeAlreadyOpened,
    #[msg("Dispute is not resolved")]
    DisputeNotResolved,
    #[msg("Voting period has not ended")]
    VotingPeriodNotEnded,
    #[msg("Voting period has ended")]
    VotingPeriodEnded,
    #[msg("Cannot vote for pending")]
    CannotVoteForPending,
    #[msg("Cannot dispute with pending status")]
    CannotDisputeWithPendingStatus,
    #[msg("Reason is too long")]
    ReasonTooLong,
    #[msg("Oracle is not in a disputable state")]
    MarketState,
    #[msg("Caller is not the owner or approved")]
    NotNftOwnerOrApproved,
    #[msg("Caller is not the disputer")]
    NotTheDisputer,
    #[msg("Rewards already claimed for token id")]
    AlreadyClaimedForTokenId,
    #[msg("Collateral already taken")]
    AlreadyTaken,
    #[msg("Collateral cannot be claimed")]
    CannotClaimCollateral,
    #[msg("No valid votes")]
    NoValidVotes,
    #[msg("No one voted")]
    NoOneVoted,
    #[msg("Token id did not vote")]
    TokenIdDidNotVote,
    #[msg("Market not found for oracle")]
    MarketNotFound,
    #[msg("Token is blocked until its penalty is paid")]
    TokenBlocked,
    #[msg("Unwrap cooldown has not elapsed")]
    TooEarly,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Instruction is not available on this deployment")]
    WrongDeployment,
    #[msg("Invalid account")]
    InvalidAccount,
    #[msg("Remaining accounts do not match the token ids")]
    AccountCountMismatch,
    #[msg("Too many token ids for one message")]
    TooManyTokenIds,
    #[msg("No peer configured for endpoint id")]
    PeerNotSet,
    #[msg("Message sender is not the configured peer")]
    UntrustedPeer,
    #[msg("Unknown message type")]
    UnknownMessageType,
    #[msg("Message payload could not be decoded")]
    InvalidPayload,
    #[msg("Penalty token not set")]
    PenaltyTokenNotSet,
    #[msg("No penalty to pay")]
    NoPenalty,
    #[msg("Invalid mint")]
    InvalidMint,
    #[msg("Invalid cooldown")]
    InvalidCooldown,
    #[msg("Math overflow")]
    MathOverflow,
}
