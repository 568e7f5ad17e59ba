use crate::model::RenameRow;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local};
use csv::ByteRecord;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Default file name of the undo log inside the state directory
pub const LOG_FILE_NAME: &str = "rename_map.csv";

const HEADER: [&str; 6] = [
    "timestamp",
    "old_name",
    "new_name",
    "old_full_path",
    "new_full_path",
    "success",
];

/// One line of the undo log
#[derive(Debug, Clone)]
struct LogRecord {
    timestamp: String,
    old_name: String,
    new_name: String,
    old_full_path: PathBuf,
    new_full_path: PathBuf,
    success: bool,
}

impl LogRecord {
    fn from_row(row: &RenameRow, timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            old_name: row.old_name.clone(),
            new_name: row.new_name.clone(),
            old_full_path: row.old_path.clone(),
            new_full_path: row.new_path.clone(),
            success: row.success,
        }
    }

    fn to_byte_record(&self) -> Result<ByteRecord> {
        let mut record = ByteRecord::new();
        record.push_field(self.timestamp.as_bytes());
        record.push_field(self.old_name.as_bytes());
        record.push_field(self.new_name.as_bytes());
        record.push_field(&encode_path(&self.old_full_path)?);
        record.push_field(&encode_path(&self.new_full_path)?);
        record.push_field(if self.success { b"True" } else { b"False" });
        Ok(record)
    }

    /// `None` for records without exactly the six logged fields.
    fn from_byte_record(record: &ByteRecord) -> Option<Result<Self>> {
        if record.len() != HEADER.len() {
            return None;
        }
        let text = |idx: usize| String::from_utf8_lossy(&record[idx]).into_owned();

        let parse = || -> Result<Self> {
            Ok(Self {
                timestamp: text(0),
                old_name: text(1),
                new_name: text(2),
                old_full_path: decode_path(&record[3])?,
                new_full_path: decode_path(&record[4])?,
                // `True`/`False`, read case-insensitively
                success: text(5).trim().eq_ignore_ascii_case("true"),
            })
        };
        Some(parse())
    }

    fn into_row(self) -> RenameRow {
        RenameRow {
            old_path: self.old_full_path,
            new_path: self.new_full_path,
            old_name: self.old_name,
            new_name: self.new_name,
            success: self.success,
            error_message: String::new(),
        }
    }
}

// Paths are logged as their raw OS bytes so names that are not valid UTF-8
// still round-trip.
#[cfg(unix)]
fn encode_path(path: &Path) -> Result<Cow<'_, [u8]>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(Cow::Borrowed(path.as_os_str().as_bytes()))
}

#[cfg(unix)]
fn decode_path(bytes: &[u8]) -> Result<PathBuf> {
    use std::os::unix::ffi::OsStrExt;
    Ok(PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn encode_path(path: &Path) -> Result<Cow<'_, [u8]>> {
    path.to_str()
        .map(|s| Cow::Borrowed(s.as_bytes()))
        .ok_or_else(|| anyhow!("path is not valid unicode: {}", path.display()))
}

#[cfg(not(unix))]
fn decode_path(bytes: &[u8]) -> Result<PathBuf> {
    String::from_utf8(bytes.to_vec())
        .map(PathBuf::from)
        .context("undo log path is not valid unicode")
}

/// Whether `path` can be written to the undo log without loss
pub(crate) fn is_recordable(path: &Path) -> bool {
    encode_path(path).is_ok()
}

/// Format a transaction timestamp. Equal strings mean the same transaction.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Summary of one recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub timestamp: String,
    pub rows: usize,
    pub succeeded: usize,
}

/// Append-only CSV record of executed batches
#[derive(Debug, Clone)]
pub struct UndoLog {
    path: PathBuf,
}

impl UndoLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log at its default location inside `state_dir`
    pub fn in_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(LOG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `rows` as one transaction stamped with `timestamp`.
    ///
    /// Every record is encoded before the file is opened, so a row that cannot
    /// be encoded leaves the log untouched. The header is written only when
    /// the log is created.
    pub fn append(&self, rows: &[RenameRow], timestamp: &DateTime<Local>) -> Result<()> {
        let stamp = format_timestamp(timestamp);
        let is_new = fs::metadata(&self.path).map_or(true, |meta| meta.len() == 0);
        let encoded = encode_transaction(rows, &stamp, is_new)
            .with_context(|| format!("Failed to encode undo log records: {}", self.path.display()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create undo log directory: {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open undo log: {}", self.path.display()))?;

        // An interrupted earlier write can leave a partial line behind; start
        // on a fresh one so this transaction is not glued onto it.
        let mut buffer = Vec::with_capacity(encoded.len() + 1);
        if !is_new && !ends_with_newline(&mut file)? {
            buffer.push(b'\n');
        }
        buffer.extend_from_slice(&encoded);

        file.write_all(&buffer)
            .and_then(|()| file.flush())
            .with_context(|| format!("Failed to write undo log: {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            rows = rows.len(),
            timestamp = %stamp,
            "recorded transaction"
        );
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "undo log does not exist");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open undo log: {}", self.path.display()))?;

        let headers = reader
            .byte_headers()
            .with_context(|| format!("Failed to parse undo log: {}", self.path.display()))?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(HEADER.iter().map(|field| field.as_bytes())) {
            bail!("Unexpected undo log header in {}", self.path.display());
        }

        let mut records = Vec::new();
        for result in reader.byte_records() {
            let record = result
                .with_context(|| format!("Failed to parse undo log: {}", self.path.display()))?;
            match LogRecord::from_byte_record(&record) {
                Some(parsed) => records.push(parsed.with_context(|| {
                    format!("Failed to parse undo log: {}", self.path.display())
                })?),
                None => tracing::warn!(
                    path = %self.path.display(),
                    line = record.position().map_or(0, csv::Position::line),
                    fields = record.len(),
                    "skipping incomplete undo log record"
                ),
            }
        }
        Ok(records)
    }

    /// Rows of the most recently appended transaction, in recorded order.
    ///
    /// A missing or empty log yields no rows. Incomplete records left by an
    /// interrupted write are skipped.
    pub fn load_latest_transaction(&self) -> Result<Vec<RenameRow>> {
        let mut records = self.read_records()?;
        let Some(latest) = records.last().map(|record| record.timestamp.clone()) else {
            return Ok(Vec::new());
        };

        let start = records
            .iter()
            .rposition(|record| record.timestamp != latest)
            .map_or(0, |pos| pos + 1);

        Ok(records
            .drain(start..)
            .map(LogRecord::into_row)
            .collect())
    }

    /// Every recorded transaction, most recent first
    pub fn transactions(&self) -> Result<Vec<TransactionSummary>> {
        let mut summaries: Vec<TransactionSummary> = Vec::new();

        for record in self.read_records()? {
            match summaries.last_mut() {
                Some(last) if last.timestamp == record.timestamp => {
                    last.rows += 1;
                    last.succeeded += usize::from(record.success);
                },
                _ => summaries.push(TransactionSummary {
                    timestamp: record.timestamp,
                    rows: 1,
                    succeeded: usize::from(record.success),
                }),
            }
        }

        summaries.reverse();
        Ok(summaries)
    }
}

fn encode_transaction(rows: &[RenameRow], stamp: &str, with_header: bool) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(HEADER)?;
    }
    for row in rows {
        writer.write_byte_record(&LogRecord::from_row(row, stamp).to_byte_record()?)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("failed to finish undo log records: {}", e.error()))
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .context("Failed to inspect end of undo log")?;
    Ok(last[0] == b'\n')
}
