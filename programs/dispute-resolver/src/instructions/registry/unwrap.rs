use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{ResolverConfig, VotingNft};
use crate::events::NftUnwrapped;
use crate::errors::DisputeError;
use crate::utils::accounts::{close, load, require_address};

/// `[voting_nft, custody_nft_account, recipient_nft_account]`
pub const UNWRAP_ACCOUNTS_PER_TOKEN: usize = 3;

#[derive(Accounts)]
pub struct Unwrap<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    /// Owner or approved operator; receives the rent of the closed accounts
    #[account(mut)]
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_unwrap<'info>(
    ctx: Context<'_, '_, '_, 'info, Unwrap<'info>>,
    recipient: Pubkey,
    token_ids: Vec<u64>,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    // Guards
    config.require_home()?;
    require!(!token_ids.is_empty(), DisputeError::EmptyArray);
    require!(
        ctx.remaining_accounts.len() == token_ids.len() * UNWRAP_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let caller = ctx.accounts.caller.to_account_info();
    let config_info = config.to_account_info();
    let token_program = ctx.accounts.token_program.to_account_info();
    let bump = [config.bump];
    let seeds: &[&[u8]] = &[CONFIG_SEED, &bump];
    let signer = &[seeds];

    for (token_id, accounts) in token_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(UNWRAP_ACCOUNTS_PER_TOKEN))
    {
        let [voting_nft, custody, recipient_nft_account] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let nft: VotingNft = load(voting_nft)?;
        require!(nft.token_id == *token_id, DisputeError::InvalidAccount);
        nft.check_unwrap(&caller.key(), now)?;

        let (custody_address, _) =
            Pubkey::find_program_address(&[CUSTODY_SEED, nft.position_mint.as_ref()], &crate::ID);
        require_address(custody, &custody_address)?;

        let destination = TokenAccount::try_deserialize(&mut &recipient_nft_account.try_borrow_data()?[..])?;
        require_keys_eq!(destination.owner, recipient, DisputeError::InvalidAccount);
        require_keys_eq!(destination.mint, nft.position_mint, DisputeError::InvalidMint);

        // Burn the voting NFT before the position leaves custody
        close(voting_nft, &caller)?;

        token::transfer(
            CpiContext::new_with_signer(
                token_program.clone(),
                Transfer {
                    from: custody.clone(),
                    to: recipient_nft_account.clone(),
                    authority: config_info.clone(),
                },
                signer,
            ),
            1,
        )?;
        token::close_account(CpiContext::new_with_signer(
            token_program.clone(),
            CloseAccount {
                account: custody.clone(),
                destination: caller.clone(),
                authority: config_info.clone(),
            },
            signer,
        ))?;

        emit!(NftUnwrapped {
            caller: caller.key(),
            recipient,
            token_id: *token_id,
        });
    }

    let config = &mut ctx.accounts.config;
    config.total_wrapped = config
        .total_wrapped
        .checked_sub(token_ids.len() as u64)
        .ok_or(DisputeError::MathOverflow)?;

    Ok(())
}
