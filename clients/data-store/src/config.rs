use std::path::Path;

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Program id of the Pinocchio upsert program,
/// `DFua3mvBJRTZmQUXEXmyPkjx4sDyb9RN4Y412mnCHh6P`.
pub const NATIVE_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0xB6, 0x1D, 0xD0, 0xB7, 0x26, 0x05, 0x0C, 0x37,
    0xEF, 0x7F, 0x31, 0xA7, 0x53, 0xEA, 0xF3, 0x19,
    0xD5, 0xAB, 0xC6, 0xC5, 0x56, 0x32, 0x44, 0xB2,
    0x79, 0xCC, 0x09, 0xCC, 0xF5, 0x6A, 0xDD, 0xA8,
]);

/// Bytes of metadata the runtime charges rent for on every account.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Largest data length the runtime allows for an account.
pub const MAX_ACCOUNT_LEN: u64 = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Anchor program owning `["data", user]` accounts
    #[serde(with = "pubkey_str")]
    pub program_id: Pubkey,
    /// Pinocchio program owning `[user]` accounts
    #[serde(with = "pubkey_str")]
    pub native_program_id: Pubkey,
    pub rent: RentConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            program_id: data_store::ID,
            native_program_id: NATIVE_PROGRAM_ID,
            rent: RentConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))?;
        config.rent.validate()?;
        Ok(config)
    }

    /// Read a TOML file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&s)?;
        tracing::info!(path = %path.display(), program_id = %config.program_id, "config loaded");
        Ok(config)
    }
}

/// Rent parameters of the cluster, defaulting to the runtime's built-in values.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RentConfig {
    pub lamports_per_byte_year: u64,
    pub exemption_threshold: f64,
}

impl Default for RentConfig {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold: 2.0,
        }
    }
}

impl RentConfig {
    /// Lamports an account of `data_len` bytes must hold to be rent exempt.
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        let bytes = ACCOUNT_STORAGE_OVERHEAD.saturating_add(data_len as u64);
        (bytes.saturating_mul(self.lamports_per_byte_year) as f64 * self.exemption_threshold) as u64
    }

    /// Reject parameters that cannot price every account size the runtime allows.
    pub fn validate(&self) -> Result<()> {
        if !self.exemption_threshold.is_finite() || self.exemption_threshold < 0.0 {
            return Err(StoreError::Config(format!(
                "rent.exemption_threshold must be a finite non-negative number, got {}",
                self.exemption_threshold
            )));
        }
        let largest = ACCOUNT_STORAGE_OVERHEAD + MAX_ACCOUNT_LEN;
        let scaled = largest
            .checked_mul(self.lamports_per_byte_year)
            .map(|base| base as f64 * self.exemption_threshold);
        match scaled {
            Some(lamports) if lamports < u64::MAX as f64 => Ok(()),
            _ => Err(StoreError::Config(format!(
                "rent.lamports_per_byte_year {} overflows the balance of a {} byte account",
                self.lamports_per_byte_year, MAX_ACCOUNT_LEN
            ))),
        }
    }
}

mod pubkey_str {
    use anchor_lang::prelude::Pubkey;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| D::Error::custom(format!("invalid pubkey: {s}")))
    }
}
