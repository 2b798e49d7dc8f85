//! The account store contract and the composite `set_data` operation.

use anchor_lang::prelude::Pubkey;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// A decoded data account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub address: Pubkey,
    /// Controlling identity, fixed at creation
    pub owner: Pubkey,
    pub bump: u8,
    pub payload: Vec<u8>,
    /// Lamports held as the storage reserve
    pub lamports: u64,
}

/// Result of a single existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Absent,
    Present(StoredAccount),
}

impl Lookup {
    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }

    pub fn into_account(self) -> Option<StoredAccount> {
        match self {
            Lookup::Absent => None,
            Lookup::Present(account) => Some(account),
        }
    }
}

/// A ledger hosting one data account per owner.
///
/// Every mutation is all-or-nothing: on error no payload or balance has
/// changed. Implementations do no locking of their own; the host ledger is
/// expected to serialise operations that touch the same account.
pub trait AccountStore {
    /// Address the owner's account lives at, whether or not it exists.
    fn address_of(&self, owner: &Pubkey) -> Pubkey;

    fn lookup(&self, owner: &Pubkey) -> Result<Lookup>;

    /// Create an empty account, debiting the owner for the minimum reserve.
    fn init(&mut self, owner: &Pubkey) -> Result<StoredAccount>;

    /// Replace the payload, charging or refunding the reserve difference.
    fn update(&mut self, owner: &Pubkey, payload: &[u8]) -> Result<()>;

    /// Delete the account; returns the lamports refunded to the owner.
    fn close(&mut self, owner: &Pubkey) -> Result<u64>;

    fn get(&self, owner: &Pubkey) -> Result<Vec<u8>> {
        match self.lookup(owner)? {
            Lookup::Present(account) => Ok(account.payload),
            Lookup::Absent => Err(StoreError::NotFound {
                address: self.address_of(owner),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDataOutcome {
    /// The account did not exist and was created before writing
    Created,
    /// An existing account was overwritten
    Updated,
}

/// Write `payload` for `owner`, creating the account first if needed.
///
/// This runs `init` and `update` as two separate operations. If `update`
/// fails after a successful `init`, the account is left in place with an
/// empty payload; callers that cannot tolerate that intermediate state should
/// use a single-instruction upsert (`InMemoryLedger::save`, or the Pinocchio
/// program's `save`) instead.
///
/// A lost race is recovered once in each direction: `AlreadyExists` from
/// `init` falls through to `update`, and `NotFound` from `update` re-runs
/// `init` and retries.
pub fn set_data<S>(store: &mut S, owner: &Pubkey, payload: &[u8]) -> Result<SetDataOutcome>
where
    S: AccountStore + ?Sized,
{
    let mut outcome = SetDataOutcome::Updated;

    if !store.lookup(owner)?.is_present() {
        debug!(%owner, "data account absent, creating");
        match store.init(owner) {
            Ok(_) => outcome = SetDataOutcome::Created,
            Err(StoreError::AlreadyExists { address }) => {
                warn!(%owner, %address, "data account appeared before init, updating instead");
            }
            Err(e) => return Err(e),
        }
    }

    match store.update(owner, payload) {
        Ok(()) => Ok(outcome),
        Err(StoreError::NotFound { address }) => {
            warn!(%owner, %address, "data account vanished before update, recreating");
            store.init(owner)?;
            store.update(owner, payload)?;
            Ok(SetDataOutcome::Created)
        }
        Err(e) => Err(e),
    }
}
