use anchor_lang::prelude::*;
use super::ExternalAccount;
use crate::errors::DisputeError;

pub const ORACLE_MARKET_SEED: &[u8] = b"oracle_market";

/// Market factory's oracle -> market index entry, at `["oracle_market", oracle]`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OracleMarket {
    pub oracle: Pubkey,
    pub market: Pubkey,
}

impl ExternalAccount for OracleMarket {
    const NAME: &'static str = "OracleMarket";
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarketState {
    pub collateral_mint: Pubkey,
    pub collateral_tvl: u64,
}

impl ExternalAccount for MarketState {
    const NAME: &'static str = "Market";
}

/// Resolves the market behind `oracle` through the factory index and returns its state.
pub fn market_for_oracle(
    oracle: &Pubkey,
    oracle_market: &AccountInfo,
    market: &AccountInfo,
    factory_program: &Pubkey,
    market_program: &Pubkey,
) -> Result<MarketState> {
    let (expected, _) = Pubkey::find_program_address(&[ORACLE_MARKET_SEED, oracle.as_ref()], factory_program);
    require_keys_eq!(oracle_market.key(), expected, DisputeError::MarketNotFound);
    if oracle_market.owner != factory_program || oracle_market.data_is_empty() {
        return err!(DisputeError::MarketNotFound);
    }

    let entry = OracleMarket::load(oracle_market, factory_program)?;
    require_keys_eq!(entry.oracle, *oracle, DisputeError::MarketNotFound);
    require_keys_eq!(entry.market, market.key(), DisputeError::MarketNotFound);

    MarketState::load(market, market_program)
}
