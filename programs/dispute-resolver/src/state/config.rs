use anchor_lang::prelude::*;
use crate::constants::{MSG_CLAIM_REWARDS_REQUEST, MSG_VOTE_REQUEST};
use crate::errors::DisputeError;

#[account]
pub struct ResolverConfig {
    pub admin: Pubkey,
    pub deployment: Deployment,
    pub local_eid: u32,
    /// Endpoint id of the Home deployment; equals `local_eid` on Home
    pub home_eid: u32,
    pub staking_program: Pubkey,
    pub market_factory_program: Pubkey,
    pub market_program: Pubkey,
    pub oracle_program: Pubkey,
    pub fee_vault_program: Pubkey,
    pub fee_vault: Pubkey,
    pub endpoint_program: Pubkey,
    pub required_pool_id: u8,
    pub vote_cooldown: i64,
    pub unwrap_cooldown: i64,
    pub penalty_mint: Option<Pubkey>,
    pub enforced_vote_options: ExecutorOptions,
    pub enforced_claim_options: ExecutorOptions,
    pub total_wrapped: u64,
    pub bump: u8,
}

impl ResolverConfig {
    // 8 discriminator + 32 admin + 1 deployment + 4 + 4 eids
    // + 7 * 32 program/account keys + 1 pool id + 8 + 8 cooldowns
    // + 33 penalty mint + 2 * 12 executor options + 8 total wrapped + 1 bump
    pub const LEN: usize = 8 + 32 + 1 + 4 + 4 + 7 * 32 + 1 + 8 + 8 + 33 + 2 * ExecutorOptions::LEN + 8 + 1;

    pub fn require_home(&self) -> Result<()> {
        require!(self.deployment == Deployment::Home, DisputeError::WrongDeployment);
        Ok(())
    }

    pub fn require_remote(&self) -> Result<()> {
        require!(self.deployment == Deployment::Remote, DisputeError::WrongDeployment);
        Ok(())
    }

    /// Mint penalties are charged in. Only Home keeps a registry to penalize.
    pub fn penalty_token(&self) -> Result<Pubkey> {
        self.require_home()?;
        self.penalty_mint.ok_or(error!(DisputeError::PenaltyTokenNotSet))
    }

    pub fn enforced_options(&self, msg_type: u8) -> Result<ExecutorOptions> {
        match msg_type {
            MSG_VOTE_REQUEST => Ok(self.enforced_vote_options),
            MSG_CLAIM_REWARDS_REQUEST => Ok(self.enforced_claim_options),
            _ => err!(DisputeError::UnknownMessageType),
        }
    }

    pub fn set_enforced_options(&mut self, msg_type: u8, options: ExecutorOptions) -> Result<()> {
        match msg_type {
            MSG_VOTE_REQUEST => self.enforced_vote_options = options,
            MSG_CLAIM_REWARDS_REQUEST => self.enforced_claim_options = options,
            _ => return err!(DisputeError::UnknownMessageType),
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Deployment {
    /// Owns the voting-power registry and relays votes outward
    Home,
    /// Receives relayed votes and claims from Home
    Remote,
}

/// Execution budget attached to an outgoing cross-chain message.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub struct ExecutorOptions {
    pub compute_units: u32,
    pub native_drop: u64,
}

impl ExecutorOptions {
    pub const LEN: usize = 4 + 8;

    /// Enforced options are a floor: the caller's options are added on top.
    pub fn combine(&self, extra: &ExecutorOptions) -> Result<ExecutorOptions> {
        Ok(ExecutorOptions {
            compute_units: self
                .compute_units
                .checked_add(extra.compute_units)
                .ok_or(DisputeError::MathOverflow)?,
            native_drop: self
                .native_drop
                .checked_add(extra.native_drop)
                .ok_or(DisputeError::MathOverflow)?,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::LEN);
        self.serialize(&mut out)
            .map_err(|_| error!(DisputeError::InvalidPayload))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code<T>(res: Result<T>) -> u32 {
        match res {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    fn config(deployment: Deployment) -> ResolverConfig {
        ResolverConfig {
            admin: Pubkey::new_unique(),
            deployment,
            local_eid: 30101,
            home_eid: 30101,
            staking_program: Pubkey::new_unique(),
            market_factory_program: Pubkey::new_unique(),
            market_program: Pubkey::new_unique(),
            oracle_program: Pubkey::new_unique(),
            fee_vault_program: Pubkey::new_unique(),
            fee_vault: Pubkey::new_unique(),
            endpoint_program: Pubkey::new_unique(),
            required_pool_id: 2,
            vote_cooldown: 0,
            unwrap_cooldown: 0,
            penalty_mint: None,
            enforced_vote_options: ExecutorOptions { compute_units: 200_000, native_drop: 0 },
            enforced_claim_options: ExecutorOptions { compute_units: 250_000, native_drop: 0 },
            total_wrapped: 0,
            bump: 255,
        }
    }

    #[test]
    fn serialized_config_fits_len() {
        let mut cfg = config(Deployment::Home);
        cfg.penalty_mint = Some(Pubkey::new_unique());
        let mut buf = Vec::new();
        cfg.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), ResolverConfig::LEN);
    }

    #[test]
    fn deployment_gates() {
        assert!(config(Deployment::Home).require_home().is_ok());
        assert!(config(Deployment::Home).require_remote().is_err());
        assert!(config(Deployment::Remote).require_remote().is_ok());
    }

    #[test]
    fn penalty_token_is_home_only() {
        let mut remote = config(Deployment::Remote);
        assert_eq!(code(remote.penalty_token()), u32::from(DisputeError::WrongDeployment));
        remote.penalty_mint = Some(Pubkey::new_unique());
        assert_eq!(code(remote.penalty_token()), u32::from(DisputeError::WrongDeployment));

        let mut home = config(Deployment::Home);
        assert_eq!(code(home.penalty_token()), u32::from(DisputeError::PenaltyTokenNotSet));
        let mint = Pubkey::new_unique();
        home.penalty_mint = Some(mint);
        assert_eq!(home.penalty_token().unwrap(), mint);
    }

    #[test]
    fn enforced_options_are_keyed_by_message_type() {
        let mut cfg = config(Deployment::Home);
        assert_eq!(cfg.enforced_options(MSG_VOTE_REQUEST).unwrap().compute_units, 200_000);
        assert_eq!(cfg.enforced_options(MSG_CLAIM_REWARDS_REQUEST).unwrap().compute_units, 250_000);
        assert!(cfg.enforced_options(7).is_err());

        let opts = ExecutorOptions { compute_units: 300_000, native_drop: 5 };
        cfg.set_enforced_options(MSG_CLAIM_REWARDS_REQUEST, opts).unwrap();
        assert_eq!(cfg.enforced_options(MSG_CLAIM_REWARDS_REQUEST).unwrap(), opts);
        assert!(cfg.set_enforced_options(0, opts).is_err());
    }

    #[test]
    fn caller_options_add_to_enforced_floor() {
        let enforced = ExecutorOptions { compute_units: 200_000, native_drop: 0 };
        let extra = ExecutorOptions { compute_units: 50_000, native_drop: 1_000 };
        let combined = enforced.combine(&extra).unwrap();
        assert_eq!(combined, ExecutorOptions { compute_units: 250_000, native_drop: 1_000 });

        let max = ExecutorOptions { compute_units: u32::MAX, native_drop: 0 };
        assert!(max.combine(&extra).is_err());
    }
}
