//! Ledger configuration
//!
//! One struct, JSON on disk, strict parsing: unknown fields are rejected
//! rather than ignored, so a typo in a config file is an error and not a
//! silently-applied default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::journal::{JournalError, JournalWriter};
use crate::ledger::{MemoryLedger, RentPolicy};

/// Configuration for a tallydb ledger instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LedgerConfig {
    /// Namespace tag for address derivation. Two instances with different
    /// tags derive disjoint address spaces.
    pub namespace_tag: String,
    /// Minimum-balance policy for slot allocation.
    pub rent: RentPolicy,
    /// Where to append the transition journal; `None` disables journaling.
    pub journal_path: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            namespace_tag: "expense".to_string(),
            rent: RentPolicy::default(),
            journal_path: None,
        }
    }
}

impl LedgerConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Builds the in-memory ledger this configuration describes, creating
    /// the transition journal if one is configured.
    pub fn open_ledger(&self) -> Result<MemoryLedger, ConfigError> {
        match &self.journal_path {
            Some(path) => {
                let journal = JournalWriter::create(path)?;
                Ok(MemoryLedger::with_journal(self.rent, journal))
            }
            None => Ok(MemoryLedger::new(self.rent)),
        }
    }
}

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config I/O: {0}")]
    Io(#[from] io::Error),

    /// The configuration is not valid JSON or names unknown fields.
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured journal could not be created.
    #[error("config journal: {0}")]
    Journal(#[from] JournalError),
}
