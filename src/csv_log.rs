use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::record::{self, Record};
use crate::store::{ObjectStore, StoreError};

/// Whether the log object has ever been uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogState {
    Absent,
    Present,
}

/// Parsed contents of the log, for display.
pub struct LogTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Append-only CSV log kept under one key of an object store, staged through
/// a local scratch file.
pub struct CsvLog<S> {
    store: S,
    key: String,
    scratch: PathBuf,
}

impl<S: ObjectStore> CsvLog<S> {
    pub fn new(store: S, key: impl Into<String>, scratch: impl Into<PathBuf>) -> Self {
        Self {
            store,
            key: key.into(),
            scratch: scratch.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    pub async fn exists(&self) -> Result<bool, StoreError> {
        self.store.exists(&self.key).await
    }

    pub async fn state(&self) -> Result<LogState, StoreError> {
        Ok(if self.exists().await? {
            LogState::Present
        } else {
            LogState::Absent
        })
    }

    pub async fn download(&self, local: &Path) -> Result<(), StoreError> {
        ensure_parent(local)?;
        self.store.download(&self.key, local).await
    }

    /// Writes `header` (only when `file_is_new`) followed by `row`. A new file
    /// is truncated first so nothing can precede the header.
    pub fn append_row(
        &self,
        local: &Path,
        header: &[&str],
        row: &[String],
        file_is_new: bool,
    ) -> Result<(), StoreError> {
        ensure_parent(local)?;
        let file = if file_is_new {
            File::create(local)?
        } else {
            OpenOptions::new().append(true).open(local)?
        };

        let mut writer = csv::Writer::from_writer(file);
        if file_is_new {
            writer.write_record(header)?;
        }
        writer.write_record(row)?;
        writer.flush()?;
        Ok(())
    }

    pub async fn upload(&self, local: &Path) -> Result<(), StoreError> {
        self.store.upload(local, &self.key).await
    }

    /// Download (if present), append one record, upload. Returns the state the
    /// log was in before the append.
    pub async fn append(&self, record: &Record) -> Result<LogState, StoreError> {
        let state = self.state().await?;
        if state == LogState::Present {
            self.download(&self.scratch).await?;
        }

        let header = record::header();
        self.append_row(&self.scratch, &header, &record.to_row(), state == LogState::Absent)?;
        self.upload(&self.scratch).await?;

        info!(
            "Appended record {} to {} (log was {:?})",
            record.timestamp(),
            self.key,
            state
        );
        Ok(state)
    }

    /// Current log contents, or `None` when the object does not exist yet.
    pub async fn read_table(&self) -> Result<Option<LogTable>, StoreError> {
        if self.state().await? == LogState::Absent {
            return Ok(None);
        }
        self.download(&self.scratch).await?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.scratch)?;
        let header = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Some(LogTable { header, rows }))
    }
}

fn ensure_parent(local: &Path) -> std::io::Result<()> {
    match local.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
}

// ── Tests ──
