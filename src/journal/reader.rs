//! Journal reader with strict corruption detection
//!
//! Every record's checksum is verified and sequence numbers must increase
//! strictly from 1. Any violation halts the read; nothing past a bad
//! record is trusted.

use std::fs;
use std::path::Path;

use super::errors::{JournalError, JournalResult};
use super::record::JournalRecord;

/// Sequential reader over a journal file.
pub struct JournalReader {
    data: Vec<u8>,
    offset: usize,
    last_seq: u64,
}

impl JournalReader {
    /// Opens the journal at `path`, reading it fully into memory. Journals
    /// are bounded by the life of one ledger instance, so whole-file reads
    /// keep the corruption checks simple.
    pub fn open(path: &Path) -> JournalResult<Self> {
        Ok(Self {
            data: fs::read(path)?,
            offset: 0,
            last_seq: 0,
        })
    }

    /// The byte offset the next read starts from.
    pub fn offset(&self) -> u64 {
        self.offset as u64
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a record was read and verified
    /// - `Ok(None)` at end of journal
    /// - `Err(Corrupt)` on checksum failure or truncation
    /// - `Err(SequenceGap)` if sequence numbers do not increase by one
    pub fn read_next(&mut self) -> JournalResult<Option<JournalRecord>> {
        if self.offset >= self.data.len() {
            return Ok(None);
        }

        let (record, consumed) = JournalRecord::deserialize(&self.data[self.offset..])
            .map_err(|err| self.rebase(err))?;

        let expected = self.last_seq + 1;
        if record.seq != expected {
            return Err(JournalError::SequenceGap {
                expected,
                found: record.seq,
            });
        }

        self.offset += consumed;
        self.last_seq = record.seq;
        Ok(Some(record))
    }

    /// Record deserialization reports offsets relative to its input slice;
    /// shift them to absolute file offsets.
    fn rebase(&self, err: JournalError) -> JournalError {
        match err {
            JournalError::Corrupt { offset, reason } => JournalError::Corrupt {
                offset: offset + self.offset as u64,
                reason,
            },
            other => other,
        }
    }
}
