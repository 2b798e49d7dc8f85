use anchor_lang::prelude::*;

declare_id!("FVEULfHhYga7BBiq7NJiKGrg5yuJ4HrfEcR2BRaTkS27");

pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::*;

/// Seed prefix of every data account: `["data", user]`.
pub const SEED: &[u8] = b"data";

/// Largest payload a single `update` may write.
///
/// The runtime refuses to grow an account by more than 10 KiB inside one
/// instruction, and an account always starts with an empty payload.
pub const MAX_PAYLOAD_LEN: usize = 10_240;

#[program]
pub mod data_store {
    use super::*;

    /// Create the caller's data account with an empty payload.
    ///
    /// The `init` constraint fails inside the system program when the PDA is
    /// already in use, so a second `init` for the same user is rejected.
    pub fn init(ctx: Context<Init>) -> Result<()> {
        instructions::init(ctx)
    }

    /// Replace the payload, growing or shrinking the account to fit.
    ///
    /// Growth is paid by the user, shrinking refunds the surplus reserve.
    pub fn update(ctx: Context<Update>, data: Vec<u8>) -> Result<()> {
        instructions::update(ctx, data)
    }

    /// Delete the account and return its whole balance to the user.
    pub fn close(ctx: Context<Close>) -> Result<()> {
        instructions::close(ctx)
    }
}

#[error_code]
pub enum DataStoreError {
    #[msg("Unauthorized: only the account owner can modify its data")]
    Unauthorized,
    #[msg("Payload exceeds the per-instruction resize limit")]
    PayloadTooLarge,
}
