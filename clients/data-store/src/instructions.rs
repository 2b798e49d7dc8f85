//! Instruction builders for both data-store programs.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use tracing::debug;

use crate::address::{derive_address, derive_native_address};

/// `init` on the Anchor program.
pub fn init(program_id: &Pubkey, user: &Pubkey) -> Instruction {
    let (user_pda, _) = derive_address(program_id, user);
    debug!(%user, %user_pda, "building init");
    Instruction {
        program_id: *program_id,
        accounts: data_store::accounts::Init {
            user: *user,
            user_pda,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: data_store::instruction::Init {}.data(),
    }
}

/// `update(data)` on the Anchor program.
pub fn update(program_id: &Pubkey, user: &Pubkey, data: Vec<u8>) -> Instruction {
    let (user_pda, _) = derive_address(program_id, user);
    debug!(%user, %user_pda, len = data.len(), "building update");
    Instruction {
        program_id: *program_id,
        accounts: data_store::accounts::Update {
            user: *user,
            user_pda,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: data_store::instruction::Update { data }.data(),
    }
}

/// `close` on the Anchor program.
pub fn close(program_id: &Pubkey, user: &Pubkey) -> Instruction {
    let (user_pda, _) = derive_address(program_id, user);
    debug!(%user, %user_pda, "building close");
    Instruction {
        program_id: *program_id,
        accounts: data_store::accounts::Close {
            user: *user,
            user_pda,
        }
        .to_account_metas(None),
        data: data_store::instruction::Close {}.data(),
    }
}

/// Tag bytes of the Pinocchio program's instructions.
pub const NATIVE_SAVE: u8 = 0;
pub const NATIVE_CLOSE: u8 = 1;

/// Upsert `payload` through the Pinocchio program.
pub fn save(program_id: &Pubkey, user: &Pubkey, payload: &[u8]) -> Instruction {
    let (data_pda, _) = derive_native_address(program_id, user);
    debug!(%user, %data_pda, len = payload.len(), "building native save");

    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(NATIVE_SAVE);
    data.extend_from_slice(payload);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(data_pda, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    }
}

/// Close the user's account on the Pinocchio program.
pub fn close_native(program_id: &Pubkey, user: &Pubkey) -> Instruction {
    let (data_pda, _) = derive_native_address(program_id, user);
    debug!(%user, %data_pda, "building native close");
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(data_pda, false),
        ],
        data: vec![NATIVE_CLOSE],
    }
}
