use anchor_lang::prelude::*;
use crate::state::Data;
use crate::{DataStoreError, MAX_PAYLOAD_LEN, SEED};

/// Replace the stored payload.
///
/// The `realloc` constraint resizes the account to `Data::space_for(len)`
/// before this handler runs, charging the user when it grows and paying the
/// user back when it shrinks. The handler then settles any lamports still
/// above the rent-exempt minimum so the account never holds more than its
/// reserve.
pub fn update(ctx: Context<Update>, data: Vec<u8>) -> Result<()> {
    let user = &ctx.accounts.user;
    let user_pda = &mut ctx.accounts.user_pda;

    let len = data.len();
    user_pda.data = data;

    let pda_info = user_pda.to_account_info();
    let reserve = Rent::get()?.minimum_balance(pda_info.data_len());
    let refund = surplus(pda_info.lamports(), reserve);
    if refund > 0 {
        **pda_info.try_borrow_mut_lamports()? = reserve;
        let user_info = user.to_account_info();
        let credited = user_info
            .lamports()
            .checked_add(refund)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        **user_info.try_borrow_mut_lamports()? = credited;
    }

    msg!("Stored {} bytes, reserve {} lamports", len, reserve);
    Ok(())
}

/// Lamports held above `reserve`, zero when the account is at or below it.
pub(crate) fn surplus(hold: u64, reserve: u64) -> u64 {
    hold.saturating_sub(reserve)
}

#[derive(Accounts)]
#[instruction(data: Vec<u8>)]
pub struct Update<'info> {
    /// Owner; pays for growth and receives shrink refunds
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED, user.key().as_ref()],
        bump = user_pda.bump,
        constraint = data.len() <= MAX_PAYLOAD_LEN @ DataStoreError::PayloadTooLarge,
        constraint = user_pda.auth == user.key() @ DataStoreError::Unauthorized,
        realloc = Data::space_for(data.len()),
        realloc::payer = user,
        realloc::zero = false,
    )]
    pub user_pda: Account<'info, Data>,

    pub system_program: Program<'info, System>,
}
