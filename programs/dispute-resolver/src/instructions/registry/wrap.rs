use anchor_lang::prelude::*;
use anchor_spl::token::{self, InitializeAccount3, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::state::{ResolverConfig, VotingNft};
use crate::events::NftWrapped;
use crate::errors::DisputeError;
use crate::interfaces::staking::StakePosition;
use crate::interfaces::ExternalAccount;
use crate::utils::accounts::{create_pda_account, require_address, store};

/// `[stake_position, position_mint, owner_nft_account, custody_nft_account, voting_nft]`
pub const WRAP_ACCOUNTS_PER_TOKEN: usize = 5;

#[derive(Accounts)]
pub struct Wrap<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ResolverConfig>,

    /// Holder of the position NFTs, pays rent for the new accounts
    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_wrap<'info>(
    ctx: Context<'_, '_, '_, 'info, Wrap<'info>>,
    recipient: Pubkey,
    token_ids: Vec<u64>,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    // Guards
    config.require_home()?;
    require!(!token_ids.is_empty(), DisputeError::EmptyArray);
    require!(
        ctx.remaining_accounts.len() == token_ids.len() * WRAP_ACCOUNTS_PER_TOKEN,
        DisputeError::AccountCountMismatch
    );

    let owner = ctx.accounts.owner.to_account_info();
    let config_info = config.to_account_info();
    let token_program = ctx.accounts.token_program.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    for (token_id, accounts) in token_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(WRAP_ACCOUNTS_PER_TOKEN))
    {
        let [stake_position, position_mint, owner_nft_account, custody, voting_nft] = accounts else {
            return err!(DisputeError::AccountCountMismatch);
        };

        let position = StakePosition::load(stake_position, &config.staking_program)?;
        require!(position.token_id == *token_id, DisputeError::InvalidAccount);
        require_keys_eq!(position.nft_mint, position_mint.key(), DisputeError::InvalidMint);

        let (nft_address, nft_bump) = VotingNft::address(*token_id);
        require_address(voting_nft, &nft_address)?;
        let nft = VotingNft::wrap(
            &position,
            recipient,
            config.required_pool_id,
            config.vote_cooldown,
            now,
            nft_bump,
        )?;

        // Voting NFT
        let id_bytes = token_id.to_le_bytes();
        create_pda_account(
            &owner,
            voting_nft,
            &system_program,
            VotingNft::LEN,
            &crate::ID,
            &[VOTING_NFT_SEED, id_bytes.as_ref(), &[nft_bump]],
        )?;
        store(voting_nft, &nft)?;

        // Custody account for the position NFT, owned by the config PDA
        let mint_key = position_mint.key();
        let (custody_address, custody_bump) =
            Pubkey::find_program_address(&[CUSTODY_SEED, mint_key.as_ref()], &crate::ID);
        require_address(custody, &custody_address)?;
        create_pda_account(
            &owner,
            custody,
            &system_program,
            TokenAccount::LEN,
            &token::ID,
            &[CUSTODY_SEED, mint_key.as_ref(), &[custody_bump]],
        )?;
        token::initialize_account3(CpiContext::new(
            token_program.clone(),
            InitializeAccount3 {
                account: custody.clone(),
                mint: position_mint.clone(),
                authority: config_info.clone(),
            },
        ))?;

        token::transfer(
            CpiContext::new(
                token_program.clone(),
                Transfer {
                    from: owner_nft_account.clone(),
                    to: custody.clone(),
                    authority: owner.clone(),
                },
            ),
            1,
        )?;

        emit!(NftWrapped {
            caller: owner.key(),
            recipient,
            token_id: *token_id,
            power: nft.power,
            valid_to: nft.valid_to,
        });
    }

    let config = &mut ctx.accounts.config;
    config.total_wrapped = config
        .total_wrapped
        .checked_add(token_ids.len() as u64)
        .ok_or(DisputeError::MathOverflow)?;

    Ok(())
}
