#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use data_store_client::{InMemoryLedger, StoreConfig};

pub mod svm;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh ledger and an owner holding 2 SOL.
pub fn funded_ledger() -> (InMemoryLedger, Pubkey) {
    init_tracing();
    let mut ledger = InMemoryLedger::new(StoreConfig::default());
    let owner = Pubkey::new_unique();
    ledger.airdrop(&owner, 2 * LAMPORTS_PER_SOL);
    (ledger, owner)
}
