#![cfg_attr(not(test), no_std)]

use pinocchio::{
    cpi::{Seed, Signer},
    sysvars::{rent::Rent, Sysvar},
    AccountView,
    Address,
    ProgramResult,
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};
use solana_program_error::ProgramError;

pub mod instruction;
use instruction::StoreInstruction;

pub const ID: Address = Address::new_from_array([
    0xB6, 0x1D, 0xD0, 0xB7, 0x26, 0x05, 0x0C, 0x37,
    0xEF, 0x7F, 0x31, 0xA7, 0x53, 0xEA, 0xF3, 0x19,
    0xD5, 0xAB, 0xC6, 0xC5, 0x56, 0x32, 0x44, 0xB2,
    0x79, 0xCC, 0x09, 0xCC, 0xF5, 0x6A, 0xDD, 0xA8,
]);

// Helper function to find program address
fn find_pda(seeds: &[&[u8]], program_id: &[u8]) -> Result<(Address, u8), ProgramError> {
    use solana_program::pubkey::Pubkey;
    let program_bytes: [u8; 32] = program_id
        .try_into()
        .map_err(|_| ProgramError::IncorrectProgramId)?;
    let program_pubkey = Pubkey::new_from_array(program_bytes);
    let (pubkey, bump) = Pubkey::find_program_address(seeds, &program_pubkey);
    Ok((Address::new_from_array(pubkey.to_bytes()), bump))
}

#[cfg(feature = "logging")]
macro_rules! trace {
    ($($arg:tt)*) => { pinocchio_log::log!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8],
) -> ProgramResult {
    if program_id != &ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    match StoreInstruction::unpack(instruction_data)? {
        StoreInstruction::Save(payload) => save(accounts, payload),
        StoreInstruction::Close => close(accounts),
    }
}

/// Upsert the signer's payload in one instruction.
///
/// The data account lives at `find_program_address([user], ID)` and holds the
/// raw payload, so its space is exactly `payload.len()`. After this call its
/// balance equals the rent-exempt minimum for that space.
///
/// Expected accounts:
/// 0. `[writable, signer]` user
/// 1. `[writable]` data PDA
/// 2. `[]` system_program
fn save(accounts: &[AccountView], payload: &[u8]) -> ProgramResult {
    let [user_info, data_info, _system_program, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !user_info.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (expected, bump) = find_pda(&[user_info.address().as_ref()], ID.as_ref())?;
    if data_info.address().as_ref() != expected.as_ref() {
        return Err(ProgramError::InvalidSeeds);
    }

    let reserve = Rent::get()?.minimum_balance(payload.len());

    if !data_info.owned_by(&ID) {
        if !data_info.owned_by(&pinocchio_system::ID) {
            return Err(ProgramError::InvalidAccountOwner);
        }
        create(user_info, data_info, bump, reserve, payload)?;
        trace!("Created data account with {} bytes", payload.len());
        return Ok(());
    }

    let held = data_info.lamports();
    if reserve > held {
        Transfer {
            from: user_info,
            to: data_info,
            lamports: reserve - held,
        }
        .invoke()?;
    } else if reserve < held {
        let refund = held - reserve;
        let credited = user_info
            .lamports()
            .checked_add(refund)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        data_info.set_lamports(reserve);
        user_info.set_lamports(credited);
    }

    data_info.resize(payload.len())?;
    data_info.try_borrow_mut()?.copy_from_slice(payload);

    trace!("Stored {} bytes, reserve {} lamports", payload.len(), reserve);
    Ok(())
}

/// Take ownership of the still system-owned PDA and write the first payload.
///
/// Anyone can transfer lamports to the PDA before it exists, which makes
/// `CreateAccount` fail. A funded PDA is topped up to `reserve`, allocated and
/// assigned instead, and anything above `reserve` goes back to the user.
fn create(
    user_info: &AccountView,
    data_info: &AccountView,
    bump: u8,
    reserve: u64,
    payload: &[u8],
) -> ProgramResult {
    let bump_seed = [bump];
    let seeds = [
        Seed::from(user_info.address().as_ref()),
        Seed::from(&bump_seed[..]),
    ];
    let space = payload.len() as u64;
    let held = data_info.lamports();

    if held == 0 {
        CreateAccount {
            from: user_info,
            to: data_info,
            lamports: reserve,
            space,
            owner: &ID,
        }
        .invoke_signed(&[Signer::from(&seeds[..])])?;
    } else {
        if reserve > held {
            Transfer {
                from: user_info,
                to: data_info,
                lamports: reserve - held,
            }
            .invoke()?;
        }
        Allocate {
            account: data_info,
            space,
        }
        .invoke_signed(&[Signer::from(&seeds[..])])?;
        Assign {
            account: data_info,
            owner: &ID,
        }
        .invoke_signed(&[Signer::from(&seeds[..])])?;

        if held > reserve {
            let credited = user_info
                .lamports()
                .checked_add(held - reserve)
                .ok_or(ProgramError::ArithmeticOverflow)?;
            data_info.set_lamports(reserve);
            user_info.set_lamports(credited);
        }
    }

    data_info.try_borrow_mut()?.copy_from_slice(payload);
    Ok(())
}

/// Delete the signer's data account and refund every lamport.
///
/// Expected accounts:
/// 0. `[writable, signer]` user
/// 1. `[writable]` data PDA
fn close(accounts: &[AccountView]) -> ProgramResult {
    let [user_info, data_info, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !user_info.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (expected, _bump) = find_pda(&[user_info.address().as_ref()], ID.as_ref())?;
    if data_info.address().as_ref() != expected.as_ref() {
        return Err(ProgramError::InvalidSeeds);
    }

    if data_info.lamports() == 0 || !data_info.owned_by(&ID) {
        return Err(ProgramError::UninitializedAccount);
    }

    // Zero before draining so the account cannot be revived in this transaction
    data_info.try_borrow_mut()?.fill(0);
    data_info.resize(0)?;

    let held = data_info.lamports();
    let credited = user_info
        .lamports()
        .checked_add(held)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    data_info.set_lamports(0);
    user_info.set_lamports(credited);

    trace!("Closed data account, refunded {} lamports", held);
    Ok(())
}
