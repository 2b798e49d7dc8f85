//! In-memory ledger hosting data accounts.
//!
//! Accounts are stored byte-for-byte the way the programs lay them out: the
//! Anchor account as a serialized [`Data`], the native account as the raw
//! payload. Balances follow the same rent arithmetic the runtime applies, so
//! the ledger doubles as a fake of the cluster in tests.

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;
use anchor_lang::{AccountDeserialize, AccountSerialize};
use data_store::{Data, MAX_PAYLOAD_LEN};
use tracing::{debug, info};

use crate::address::{derive_address, derive_native_address};
use crate::config::{RentConfig, StoreConfig};
use crate::error::{Result, StoreError};
use crate::store::{AccountStore, Lookup, StoredAccount};

/// Raw account as the ledger holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccount {
    /// Program that owns the account
    pub program_id: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    config: StoreConfig,
    wallets: HashMap<Pubkey, u64>,
    accounts: HashMap<Pubkey, LedgerAccount>,
}

impl InMemoryLedger {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            wallets: HashMap::new(),
            accounts: HashMap::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn rent(&self) -> &RentConfig {
        &self.config.rent
    }

    /// Credit a wallet out of thin air.
    pub fn airdrop(&mut self, owner: &Pubkey, lamports: u64) {
        let balance = self.wallets.entry(*owner).or_insert(0);
        *balance = balance.saturating_add(lamports);
        debug!(%owner, lamports, balance = *balance, "airdrop");
    }

    /// Lamports in the owner's wallet.
    pub fn balance(&self, owner: &Pubkey) -> u64 {
        self.wallets.get(owner).copied().unwrap_or(0)
    }

    pub fn account(&self, address: &Pubkey) -> Option<&LedgerAccount> {
        self.accounts.get(address)
    }

    /// Upsert in one step, the way the Pinocchio program's `save` does.
    ///
    /// Creates `[owner]` under the native program with exactly
    /// `payload.len()` bytes, or resizes the existing account and settles
    /// the reserve difference with the owner.
    pub fn save(&mut self, owner: &Pubkey, payload: &[u8]) -> Result<()> {
        let (address, _) = derive_native_address(&self.config.native_program_id, owner);
        let reserve = self.config.rent.minimum_balance(payload.len());
        let available = self.balance(owner);

        match self.accounts.get(&address) {
            None => {
                ensure_funds(reserve, available)?;
                self.debit(owner, reserve);
                self.accounts.insert(
                    address,
                    LedgerAccount {
                        program_id: self.config.native_program_id,
                        lamports: reserve,
                        data: payload.to_vec(),
                    },
                );
                info!(%owner, %address, len = payload.len(), reserve, "native data account created");
            }
            Some(existing) => {
                let growth = payload.len().saturating_sub(existing.data.len());
                if growth > MAX_PAYLOAD_LEN {
                    return Err(StoreError::PayloadTooLarge {
                        len: payload.len(),
                        max: existing.data.len() + MAX_PAYLOAD_LEN,
                    });
                }
                let held = existing.lamports;
                self.settle(owner, &address, held, reserve, available)?;
                if let Some(account) = self.accounts.get_mut(&address) {
                    account.data = payload.to_vec();
                }
                info!(%owner, %address, len = payload.len(), reserve, "native data account saved");
            }
        }
        Ok(())
    }

    /// Raw payload of the owner's native account, if any.
    pub fn load(&self, owner: &Pubkey) -> Option<&[u8]> {
        let (address, _) = derive_native_address(&self.config.native_program_id, owner);
        self.accounts.get(&address).map(|account| account.data.as_slice())
    }

    /// Delete the owner's native account, refunding its balance.
    pub fn close_native(&mut self, owner: &Pubkey) -> Result<u64> {
        let (address, _) = derive_native_address(&self.config.native_program_id, owner);
        let account = self
            .accounts
            .remove(&address)
            .ok_or(StoreError::NotFound { address })?;
        self.credit(owner, account.lamports);
        info!(%owner, %address, refunded = account.lamports, "native data account closed");
        Ok(account.lamports)
    }

    fn decode(&self, owner: &Pubkey, address: &Pubkey) -> Result<Option<(Data, u64)>> {
        let Some(account) = self.accounts.get(address) else {
            return Ok(None);
        };
        let data = Data::try_deserialize(&mut account.data.as_slice()).map_err(|e| {
            StoreError::Corrupt {
                address: *address,
                reason: e.to_string(),
            }
        })?;
        if data.auth != *owner {
            return Err(StoreError::Unauthorized {
                signer: *owner,
                address: *address,
            });
        }
        Ok(Some((data, account.lamports)))
    }

    /// Bring the account at `address` from `held` to exactly `reserve`
    /// lamports, moving the difference to or from the owner's wallet.
    fn settle(
        &mut self,
        owner: &Pubkey,
        address: &Pubkey,
        held: u64,
        reserve: u64,
        available: u64,
    ) -> Result<()> {
        if reserve > held {
            let needed = reserve - held;
            ensure_funds(needed, available)?;
            self.debit(owner, needed);
            debug!(%owner, %address, charged = needed, "reserve topped up");
        } else if reserve < held {
            let refund = held - reserve;
            self.credit(owner, refund);
            debug!(%owner, %address, refund, "reserve surplus refunded");
        }
        if let Some(account) = self.accounts.get_mut(address) {
            account.lamports = reserve;
        }
        Ok(())
    }

    fn debit(&mut self, owner: &Pubkey, lamports: u64) {
        let balance = self.wallets.entry(*owner).or_insert(0);
        *balance = balance.saturating_sub(lamports);
    }

    fn credit(&mut self, owner: &Pubkey, lamports: u64) {
        let balance = self.wallets.entry(*owner).or_insert(0);
        *balance = balance.saturating_add(lamports);
    }
}

fn ensure_funds(needed: u64, available: u64) -> Result<()> {
    if needed > available {
        return Err(StoreError::InsufficientFunds { needed, available });
    }
    Ok(())
}

fn serialize(data: &Data, address: &Pubkey) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(Data::space_for(data.data.len()));
    data.try_serialize(&mut buf).map_err(|e| StoreError::Corrupt {
        address: *address,
        reason: e.to_string(),
    })?;
    Ok(buf)
}

impl AccountStore for InMemoryLedger {
    fn address_of(&self, owner: &Pubkey) -> Pubkey {
        derive_address(&self.config.program_id, owner).0
    }

    fn lookup(&self, owner: &Pubkey) -> Result<Lookup> {
        let address = self.address_of(owner);
        let lookup = match self.decode(owner, &address)? {
            None => Lookup::Absent,
            Some((data, lamports)) => Lookup::Present(StoredAccount {
                address,
                owner: data.auth,
                bump: data.bump,
                payload: data.data,
                lamports,
            }),
        };
        debug!(%owner, %address, present = lookup.is_present(), "lookup");
        Ok(lookup)
    }

    fn init(&mut self, owner: &Pubkey) -> Result<StoredAccount> {
        let (address, bump) = derive_address(&self.config.program_id, owner);
        if self.accounts.contains_key(&address) {
            return Err(StoreError::AlreadyExists { address });
        }

        let reserve = self.config.rent.minimum_balance(Data::space_for(0));
        ensure_funds(reserve, self.balance(owner))?;

        let data = Data {
            auth: *owner,
            bump,
            data: Vec::new(),
        };
        let bytes = serialize(&data, &address)?;

        self.debit(owner, reserve);
        self.accounts.insert(
            address,
            LedgerAccount {
                program_id: self.config.program_id,
                lamports: reserve,
                data: bytes,
            },
        );
        info!(%owner, %address, reserve, "data account created");

        Ok(StoredAccount {
            address,
            owner: *owner,
            bump,
            payload: Vec::new(),
            lamports: reserve,
        })
    }

    fn update(&mut self, owner: &Pubkey, payload: &[u8]) -> Result<()> {
        let address = self.address_of(owner);
        let (mut data, held) = self
            .decode(owner, &address)?
            .ok_or(StoreError::NotFound { address })?;

        // account checks run before instruction constraints
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(StoreError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        data.data = payload.to_vec();
        let bytes = serialize(&data, &address)?;
        let reserve = self.config.rent.minimum_balance(bytes.len());

        let available = self.balance(owner);
        self.settle(owner, &address, held, reserve, available)?;
        if let Some(account) = self.accounts.get_mut(&address) {
            account.data = bytes;
        }
        info!(%owner, %address, len = payload.len(), reserve, "data account updated");
        Ok(())
    }

    fn close(&mut self, owner: &Pubkey) -> Result<u64> {
        let address = self.address_of(owner);
        if self.decode(owner, &address)?.is_none() {
            return Err(StoreError::NotFound { address });
        }
        let refunded = self
            .accounts
            .remove(&address)
            .map(|account| account.lamports)
            .unwrap_or(0);
        self.credit(owner, refunded);
        info!(%owner, %address, refunded, "data account closed");
        Ok(refunded)
    }
}
