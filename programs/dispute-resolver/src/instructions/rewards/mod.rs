pub mod claim_vote_rewards;
pub mod claim_stake_rewards;

pub use claim_vote_rewards::*;
pub use claim_stake_rewards::*;
