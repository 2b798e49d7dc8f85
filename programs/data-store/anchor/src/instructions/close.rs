use anchor_lang::prelude::*;
use crate::state::Data;
use crate::{DataStoreError, SEED};

pub fn close(ctx: Context<Close>) -> Result<()> {
    // The close constraint moves every lamport to the user, zeroes the data
    // and hands the account back to the system program, which frees the PDA
    // for a later `init`.
    msg!("Data account {} closed", ctx.accounts.user_pda.key());
    Ok(())
}

#[derive(Accounts)]
pub struct Close<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED, user.key().as_ref()],
        bump = user_pda.bump,
        constraint = user_pda.auth == user.key() @ DataStoreError::Unauthorized,
        close = user
    )]
    pub user_pda: Account<'info, Data>,
}
