use anchor_lang::prelude::*;

/// A user's data account.
///
/// Memory layout (after the 8-byte discriminator):
/// [0..32]   auth: Pubkey
/// [32]      bump: u8
/// [33..37]  data length: u32 (Borsh vec prefix)
/// [37..]    data
#[account]
pub struct Data {
    /// The user that created the account; the only signer allowed to touch it
    pub auth: Pubkey,
    /// Canonical bump of `["data", auth]`
    pub bump: u8,
    /// Caller-supplied payload
    pub data: Vec<u8>,
}

impl Data {
    /// Fixed part of the account: discriminator + pubkey + u8 + vec prefix
    pub const BASE_LEN: usize = 8 + 32 + 1 + 4;

    /// Account space needed to hold a payload of `data_len` bytes.
    pub const fn space_for(data_len: usize) -> usize {
        Self::BASE_LEN + data_len
    }
}
