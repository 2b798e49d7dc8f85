//! # data-store-client
//!
//! Host-side model of the data-store programs: one variable-length data
//! account per owner, addressed by a program-derived address, whose balance is
//! always the rent-exempt minimum for its size.
//!
//! - [`AccountStore`] is the contract a ledger offers: `lookup`, `init`,
//!   `update`, `close`, `get`.
//! - [`InMemoryLedger`] implements it with the same account bytes and rent
//!   arithmetic as the on-chain programs, and adds the atomic native `save`.
//! - [`set_data`] is the "create if missing, then write" convenience.
//! - [`instructions`] builds the transactions' instructions for both programs.
//!
//! ```
//! use anchor_lang::prelude::Pubkey;
//! use data_store_client::{set_data, AccountStore, InMemoryLedger, SetDataOutcome, StoreConfig};
//!
//! let mut ledger = InMemoryLedger::new(StoreConfig::default());
//! let owner = Pubkey::new_unique();
//! ledger.airdrop(&owner, 1_000_000_000);
//!
//! assert_eq!(set_data(&mut ledger, &owner, b"hello").unwrap(), SetDataOutcome::Created);
//! assert_eq!(ledger.get(&owner).unwrap(), b"hello");
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod store;

pub use address::{derive_address, derive_native_address};
pub use config::{RentConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use ledger::{InMemoryLedger, LedgerAccount};
pub use store::{set_data, AccountStore, Lookup, SetDataOutcome, StoredAccount};
