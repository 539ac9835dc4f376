//! Narrow views of the programs the resolver talks to.
//!
//! External accounts are trusted by owning program and decoded past their
//! 8-byte Anchor discriminator. Calls into those programs are built by hand
//! with the Anchor instruction sighash, so no collaborator crate is linked.

use anchor_lang::prelude::*;
use solana_sha256_hasher::hash;
use crate::errors::DisputeError;

pub mod staking;
pub mod market;
pub mod oracle;
pub mod fee_vault;
pub mod endpoint;

pub trait ExternalAccount: AnchorDeserialize {
    /// Anchor account name, used to derive the discriminator
    const NAME: &'static str;

    fn discriminator() -> [u8; 8] {
        prefixed_hash("account", Self::NAME)
    }

    fn load(info: &AccountInfo, owner: &Pubkey) -> Result<Self> {
        require_keys_eq!(*info.owner, *owner, DisputeError::InvalidAccount);
        let data = info.try_borrow_data()?;
        Self::decode(&data)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() >= 8, DisputeError::InvalidAccount);
        require!(data[..8] == Self::discriminator(), DisputeError::InvalidAccount);
        Self::deserialize(&mut &data[8..]).map_err(|_| error!(DisputeError::InvalidAccount))
    }
}

/// First 8 bytes of `sha256("global:<name>")`.
pub fn sighash(name: &str) -> [u8; 8] {
    prefixed_hash("global", name)
}

fn prefixed_hash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

/// Instruction data: sighash followed by the Borsh-encoded arguments.
pub fn instruction_data<T: AnchorSerialize>(name: &str, args: &T) -> Result<Vec<u8>> {
    let mut data = sighash(name).to_vec();
    args.serialize(&mut data)
        .map_err(|_| error!(DisputeError::InvalidPayload))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::staking::StakePosition;

    #[test]
    fn sighash_matches_anchor_convention() {
        let expected = hash(b"global:claim_rewards").to_bytes();
        assert_eq!(sighash("claim_rewards"), expected[..8]);
        assert_ne!(sighash("claim_rewards"), sighash("send"));
    }

    #[test]
    fn decode_checks_discriminator() {
        let position = StakePosition {
            token_id: 4,
            nft_mint: Pubkey::new_unique(),
            amount: 10,
            pool_id: 2,
            locked_until: 99,
            pending_rewards: 1,
        };
        let mut data = StakePosition::discriminator().to_vec();
        position.serialize(&mut data).unwrap();
        assert_eq!(StakePosition::decode(&data).unwrap(), position);

        data[0] ^= 0xff;
        assert!(StakePosition::decode(&data).is_err());
        assert!(StakePosition::decode(&data[..4]).is_err());
    }

    #[test]
    fn instruction_data_prefixes_args() {
        let data = instruction_data("top_up_rewards", &42u64).unwrap();
        assert_eq!(data[..8], sighash("top_up_rewards"));
        assert_eq!(data[8..], 42u64.to_le_bytes());
    }
}
