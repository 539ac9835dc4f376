use anchor_lang::prelude::*;
use crate::constants::{CONFIG_SEED, PEER_SEED};
use crate::state::{Peer, ResolverConfig};
use crate::events::PeerSet;
use crate::errors::DisputeError;

#[derive(Accounts)]
#[instruction(eid: u32)]
pub struct SetPeer<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ DisputeError::Unauthorized
    )]
    pub config: Account<'info, ResolverConfig>,

    #[account(
        init_if_needed,
        seeds = [PEER_SEED, eid.to_le_bytes().as_ref()],
        bump,
        payer = admin,
        space = Peer::LEN
    )]
    pub peer: Account<'info, Peer>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Trusts `address` as the deployment on endpoint `eid`. A zero address unsets it.
pub fn process_set_peer(ctx: Context<SetPeer>, eid: u32, address: [u8; 32]) -> Result<()> {
    let peer = &mut ctx.accounts.peer;
    peer.eid = eid;
    peer.address = address;
    peer.bump = ctx.bumps.peer;

    emit!(PeerSet { eid, peer: address });
    Ok(())
}
