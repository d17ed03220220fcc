//! Destination table.
//!
//! A CSV file with the header `Account,Followers,Following` and one row
//! per exported account. The first column is the dedup key. The table is
//! append-only: rows are never rewritten or removed.

use followscope_core::ExportRecord;
use std::collections::HashSet;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::StoreError;

/// Default table file name, relative to the working directory.
pub const DEFAULT_TABLE_PATH: &str = "github_following.csv";

/// Append-only export table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    path: PathBuf,
}

impl ExportTable {
    /// Creates a handle for the table at `path`. Nothing is touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the table path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the table file exists.
    pub async fn exists(&self) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    /// Returns true if the file is missing or has no content, i.e. a header
    /// still has to be written.
    async fn needs_header(&self) -> Result<bool, StoreError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => Ok(metadata.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the raw table content, or `None` if the file does not exist.
    async fn read_content(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns every login already present in the table.
    ///
    /// The whole table is scanned; a missing file yields an empty set.
    pub async fn existing_logins(&self) -> Result<HashSet<String>, StoreError> {
        let Some(content) = self.read_content().await? else {
            return Ok(HashSet::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_slice());

        let mut logins = HashSet::new();
        for record in reader.records() {
            let record = record?;
            if let Some(login) = record.get(0).filter(|login| !login.is_empty()) {
                logins.insert(login.to_string());
            }
        }

        debug!(path = %self.path.display(), count = logins.len(), "Loaded existing logins");
        Ok(logins)
    }

    /// Reads all rows of the table.
    pub async fn records(&self) -> Result<Vec<ExportRecord>, StoreError> {
        let Some(content) = self.read_content().await? else {
            return Ok(Vec::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_slice());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            let fields: Vec<&str> = record.iter().collect();
            records.push(ExportRecord::from_fields(&fields)?);
        }
        Ok(records)
    }

    /// Creates the table with its header row if it does not exist yet.
    ///
    /// Returns true if the header was written.
    pub async fn ensure_header(&self) -> Result<bool, StoreError> {
        if !self.needs_header().await? {
            return Ok(false);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(ExportRecord::HEADER)?;
        self.append_bytes(&into_bytes(writer)?).await?;

        info!(path = %self.path.display(), "Created export table");
        Ok(true)
    }

    /// Appends rows, creating the table with its header first if needed.
    ///
    /// The caller is responsible for dedup; see [`existing_logins`](Self::existing_logins).
    pub async fn append(&self, records: &[ExportRecord]) -> Result<usize, StoreError> {
        self.ensure_header().await?;
        if records.is_empty() {
            return Ok(0);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.write_record(record.to_fields())?;
        }
        self.append_bytes(&into_bytes(writer)?).await?;

        debug!(path = %self.path.display(), rows = records.len(), "Appended rows");
        Ok(records.len())
    }

    /// Returns true if the file is non-empty and its last byte is not `\n`.
    async fn ends_mid_line(&self) -> Result<bool, StoreError> {
        let mut file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if file.metadata().await?.len() == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).await?;
        file.read_exact(&mut last).await?;
        Ok(last[0] != b'\n')
    }

    async fn append_bytes(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !tokio::fs::try_exists(parent).await? {
                debug!(path = %parent.display(), "Creating table directory");
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let line_break = self.ends_mid_line().await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        if line_break {
            debug!(path = %self.path.display(), "Terminating unfinished last line");
            file.write_all(b"\n").await?;
        }
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

impl Default for ExportTable {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_PATH)
    }
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}
