use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke, invoke_signed};
use super::instruction_data;
use crate::errors::DisputeError;
use crate::state::MessagingFee;

/// PDA of the endpoint program that signs every `lz_receive` delivery.
pub const ENDPOINT_AUTHORITY_SEED: &[u8] = b"endpoint";

pub fn delivery_authority(endpoint_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[ENDPOINT_AUTHORITY_SEED], endpoint_program).0
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessagingParams {
    pub dst_eid: u32,
    pub receiver: [u8; 32],
    pub message: Vec<u8>,
    pub options: Vec<u8>,
    pub pay_in_lz_token: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessagingReceipt {
    pub guid: [u8; 32],
    pub nonce: u64,
    pub fee: MessagingFee,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
struct SendArgs {
    params: MessagingParams,
    fee: MessagingFee,
}

pub struct EndpointAccounts<'a, 'info> {
    pub endpoint_program: AccountInfo<'info>,
    /// Resolver config PDA, the registered sending application
    pub sender: AccountInfo<'info>,
    /// Endpoint-specific accounts, forwarded untouched
    pub extra: &'a [AccountInfo<'info>],
}

impl<'a, 'info> EndpointAccounts<'a, 'info> {
    fn instruction(&self, data: Vec<u8>, sender_signs: bool) -> Instruction {
        let mut metas = vec![AccountMeta::new_readonly(self.sender.key(), sender_signs)];
        metas.extend(self.extra.iter().map(|info| AccountMeta {
            pubkey: info.key(),
            is_signer: info.is_signer,
            is_writable: info.is_writable,
        }));
        Instruction { program_id: self.endpoint_program.key(), accounts: metas, data }
    }

    fn infos(&self) -> Vec<AccountInfo<'info>> {
        let mut infos = Vec::with_capacity(self.extra.len() + 2);
        infos.push(self.sender.clone());
        infos.extend(self.extra.iter().cloned());
        infos.push(self.endpoint_program.clone());
        infos
    }

    fn read_return<T: AnchorDeserialize>(&self) -> Result<T> {
        let (program_id, data) = get_return_data().ok_or(DisputeError::InvalidPayload)?;
        require_keys_eq!(program_id, self.endpoint_program.key(), DisputeError::InvalidPayload);
        T::try_from_slice(&data).map_err(|_| error!(DisputeError::InvalidPayload))
    }
}

pub fn quote(accounts: &EndpointAccounts<'_, '_>, params: MessagingParams) -> Result<MessagingFee> {
    let ix = accounts.instruction(instruction_data("quote", &params)?, false);
    invoke(&ix, &accounts.infos())?;
    accounts.read_return()
}

pub fn send(
    accounts: &EndpointAccounts<'_, '_>,
    params: MessagingParams,
    fee: MessagingFee,
    signer_seeds: &[&[&[u8]]],
) -> Result<MessagingReceipt> {
    let ix = accounts.instruction(instruction_data("send", &SendArgs { params, fee })?, true);
    invoke_signed(&ix, &accounts.infos(), signer_seeds)?;
    accounts.read_return()
}
