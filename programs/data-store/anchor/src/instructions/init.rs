use anchor_lang::prelude::*;
use crate::state::Data;
use crate::SEED;

/// Create the user's data account with an empty payload.
///
/// Rent for `Data::space_for(0)` is paid by the user. The PDA can only be
/// created once; a second call fails because the address is no longer a
/// system-owned empty account.
pub fn init(ctx: Context<Init>) -> Result<()> {
    let user_pda = &mut ctx.accounts.user_pda;

    user_pda.auth = ctx.accounts.user.key();
    user_pda.bump = ctx.bumps.user_pda;
    user_pda.data = Vec::new();

    msg!("Data account {} created for {}", user_pda.key(), user_pda.auth);
    Ok(())
}

#[derive(Accounts)]
pub struct Init<'info> {
    /// Owner and rent payer
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init,
        payer = user,
        seeds = [SEED, user.key().as_ref()],
        bump,
        space = Data::space_for(0)
    )]
    pub user_pda: Account<'info, Data>,

    pub system_program: Program<'info, System>,
}
