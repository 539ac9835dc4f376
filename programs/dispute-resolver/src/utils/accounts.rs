use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token::{self, TokenAccount};
use crate::errors::DisputeError;

/// True once the program has written an account at this address.
pub fn is_initialized(info: &AccountInfo) -> bool {
    info.owner == &crate::ID && !info.data_is_empty()
}

/// Deserializes a program account passed through `remaining_accounts`.
pub fn load<T: AccountDeserialize>(info: &AccountInfo) -> Result<T> {
    require_keys_eq!(*info.owner, crate::ID, DisputeError::InvalidAccount);
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}

/// Serializes `value` (discriminator included) back into `info`.
pub fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    require_keys_eq!(*info.owner, crate::ID, DisputeError::InvalidAccount);
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}

/// Reads an SPL token account that was passed unchecked.
pub fn token_account(info: &AccountInfo) -> Result<TokenAccount> {
    require_keys_eq!(*info.owner, token::ID, DisputeError::InvalidAccount);
    let data = info.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}

/// Tokens credited to `info` since its balance was `before`.
pub fn token_received(info: &AccountInfo, before: u64) -> Result<u64> {
    token_account(info)?
        .amount
        .checked_sub(before)
        .ok_or(error!(DisputeError::MathOverflow))
}

pub fn require_address(info: &AccountInfo, expected: &Pubkey) -> Result<()> {
    require_keys_eq!(info.key(), *expected, DisputeError::InvalidAccount);
    Ok(())
}

/// Creates a PDA of `space` bytes owned by `owner`.
///
/// Someone may have sent lamports to the address beforehand, in which case
/// `create_account` would fail, so the account is topped up, allocated and
/// assigned instead.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(space);
    let current = target.lamports();
    let signer = &[signer_seeds];

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount { from: payer.clone(), to: target.clone() },
                signer,
            ),
            required,
            space as u64,
            owner,
        );
    }

    if required > current {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer { from: payer.clone(), to: target.clone() },
            ),
            required - current,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate { account_to_allocate: target.clone() },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign { account_to_assign: target.clone() },
            signer,
        ),
        owner,
    )
}

/// Grows a program account to `new_space`, with `payer` covering the extra rent.
pub fn grow<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    new_space: usize,
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(new_space);
    let current = target.lamports();
    if required > current {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer { from: payer.clone(), to: target.clone() },
            ),
            required - current,
        )?;
    }
    target.realloc(new_space, false)?;
    Ok(())
}

/// Closes a program account, sending its rent to `destination`.
pub fn close<'info>(info: &AccountInfo<'info>, destination: &AccountInfo<'info>) -> Result<()> {
    let balance = info.lamports();
    let new_balance = destination
        .lamports()
        .checked_add(balance)
        .ok_or(DisputeError::MathOverflow)?;
    **destination.try_borrow_mut_lamports()? = new_balance;
    **info.try_borrow_mut_lamports()? = 0;

    info.assign(&system_program::ID);
    info.realloc(0, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Packed SPL token account: mint, owner, amount, initialized, no delegate.
    fn token_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; 165];
        data[..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data[108] = 1;
        data
    }

    #[test]
    fn reads_token_balance() {
        let key = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let spl = token::ID;

        let mut lamports = 2_039_280;
        let mut data = token_data(&mint, &owner, 42_000_000);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &spl, false, 0);

        let account = token_account(&info).unwrap();
        assert_eq!(account.amount, 42_000_000);
        assert_eq!(account.mint, mint);
        assert_eq!(account.owner, owner);
    }

    #[test]
    fn received_is_the_balance_change() {
        let key = Pubkey::new_unique();
        let spl = token::ID;

        let mut lamports = 2_039_280;
        let mut data = token_data(&Pubkey::new_unique(), &Pubkey::new_unique(), 5_000);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &spl, false, 0);
        let before = token_account(&info).unwrap().amount;

        info.try_borrow_mut_data().unwrap()[64..72].copy_from_slice(&12_500u64.to_le_bytes());
        assert_eq!(token_received(&info, before).unwrap(), 7_500);
        assert_eq!(token_received(&info, 12_500).unwrap(), 0);
        assert!(token_received(&info, 20_000).is_err());
    }

    #[test]
    fn token_account_must_belong_to_token_program() {
        let key = Pubkey::new_unique();
        let program = crate::ID;

        let mut lamports = 2_039_280;
        let mut data = token_data(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &program, false, 0);
        assert!(token_account(&info).is_err());
    }

    #[test]
    fn uninitialized_program_account_is_not_initialized() {
        let key = Pubkey::new_unique();
        let program = crate::ID;
        let mut lamports = 0;
        let mut nothing: [u8; 0] = [];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut nothing, &program, false, 0);
        assert!(!is_initialized(&info));
    }
}
