use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::DisputeError;
use crate::state::dispute::Outcome;

/// Trusted counterpart deployment on another chain.
#[account]
pub struct Peer {
    pub eid: u32,
    pub address: [u8; 32],
    pub bump: u8,
}

impl Peer {
    pub const LEN: usize = 8 + 4 + 32 + 1;

    pub fn is_set(&self) -> bool {
        self.address != [0u8; 32]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteRequest {
    pub oracle: Pubkey,
    pub option: Outcome,
    pub token_ids: Vec<u64>,
    /// Frozen power of each token id, parallel to `token_ids`
    pub powers: Vec<u64>,
    pub voter: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimRewardsRequest {
    pub oracle: Pubkey,
    pub token_ids: Vec<u64>,
    /// Receives the rewards on the Remote chain
    pub voter: Pubkey,
}

/// Cross-chain payload: one type byte followed by the Borsh body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayMessage {
    Vote(VoteRequest),
    ClaimRewards(ClaimRewardsRequest),
}

impl RelayMessage {
    pub fn msg_type(&self) -> u8 {
        match self {
            RelayMessage::Vote(_) => MSG_VOTE_REQUEST,
            RelayMessage::ClaimRewards(_) => MSG_CLAIM_REWARDS_REQUEST,
        }
    }

    pub fn oracle(&self) -> Pubkey {
        match self {
            RelayMessage::Vote(req) => req.oracle,
            RelayMessage::ClaimRewards(req) => req.oracle,
        }
    }

    pub fn token_ids(&self) -> &[u64] {
        match self {
            RelayMessage::Vote(req) => &req.token_ids,
            RelayMessage::ClaimRewards(req) => &req.token_ids,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.msg_type()];
        let written = match self {
            RelayMessage::Vote(req) => req.serialize(&mut out),
            RelayMessage::ClaimRewards(req) => req.serialize(&mut out),
        };
        written.map_err(|_| error!(DisputeError::InvalidPayload))?;
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (msg_type, body) = bytes.split_first().ok_or(DisputeError::InvalidPayload)?;
        let message = match *msg_type {
            MSG_VOTE_REQUEST => RelayMessage::Vote(
                VoteRequest::try_from_slice(body).map_err(|_| error!(DisputeError::InvalidPayload))?,
            ),
            MSG_CLAIM_REWARDS_REQUEST => RelayMessage::ClaimRewards(
                ClaimRewardsRequest::try_from_slice(body)
                    .map_err(|_| error!(DisputeError::InvalidPayload))?,
            ),
            _ => return err!(DisputeError::UnknownMessageType),
        };
        message.validate()?;
        Ok(message)
    }

    /// Shape checks shared by both ends of the channel.
    pub fn validate(&self) -> Result<()> {
        let ids = self.token_ids();
        require!(!ids.is_empty(), DisputeError::EmptyTokenIdsArray);
        require!(ids.len() <= MAX_TOKEN_IDS_PER_MESSAGE, DisputeError::TooManyTokenIds);
        if let RelayMessage::Vote(req) = self {
            require!(req.option != Outcome::Pending, DisputeError::CannotVoteForPending);
            require!(req.powers.len() == req.token_ids.len(), DisputeError::InvalidPayload);
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessagingFee {
    pub native_fee: u64,
    pub lz_token_fee: u64,
}

/// Delivery handed to `lz_receive` by the messaging endpoint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LzReceiveParams {
    pub src_eid: u32,
    pub sender: [u8; 32],
    pub nonce: u64,
    pub guid: [u8; 32],
    pub message: Vec<u8>,
    pub extra_data: Vec<u8>,
}

/// Per-id outcome of replaying a relayed request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelayReport {
    pub applied: u32,
    pub skipped: u32,
}

impl RelayReport {
    pub fn skip_all(count: usize) -> Self {
        Self { applied: 0, skipped: count as u32 }
    }

    pub fn applied(&mut self) {
        self.applied = self.applied.saturating_add(1);
    }

    pub fn skipped(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }
}
