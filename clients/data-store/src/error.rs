use anchor_lang::prelude::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("data account {address} already exists")]
    AlreadyExists { address: Pubkey },
    #[error("data account {address} not found")]
    NotFound { address: Pubkey },
    #[error("insufficient funds: need {needed} lamports, wallet holds {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("payload of {len} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("{signer} is not the owner of data account {address}")]
    Unauthorized { signer: Pubkey, address: Pubkey },
    #[error("data account {address} holds undecodable data: {reason}")]
    Corrupt { address: Pubkey, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
