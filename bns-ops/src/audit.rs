//! File store for update records.
//!
//! Holds a single pretty-printed JSON document that is replaced on every
//! successful update. Writes go to a sibling temp file first and are renamed
//! into place, so a crash never leaves a half-written record behind.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, instrument};

use bns_core::error::Result;
use bns_core::types::UpdateRecord;

/// Location of the update record.
#[derive(Clone, Debug)]
pub struct AuditFile {
    path: PathBuf,
}

impl AuditFile {
    /// Creates a store writing to `path`. Nothing touches the disk until
    /// [`AuditFile::write`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the record path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored record.
    #[instrument(skip(self, record), fields(path = ?self.path))]
    pub async fn write(&self, record: &UpdateRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json.as_bytes()).await?;
        fs::rename(&temp_path, &self.path).await?;

        info!(tx_hash = %record.transaction_hash, "Update information saved");
        Ok(())
    }
}
