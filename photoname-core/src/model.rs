use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// One file slated for renaming, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionItem {
    pub path: PathBuf,
    #[serde(default = "default_label")]
    pub label: String,
    /// Positive group number
    #[serde(default = "default_group", deserialize_with = "positive_group")]
    pub group: u32,
}

pub const DEFAULT_LABEL: &str = "general";
pub const DEFAULT_GROUP: u32 = 1;

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

fn default_group() -> u32 {
    DEFAULT_GROUP
}

fn positive_group<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    NonZeroU32::deserialize(deserializer).map(NonZeroU32::get)
}

impl SelectionItem {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>, group: u32) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            group,
        }
    }

    /// An item with the default label and group.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(path, DEFAULT_LABEL, DEFAULT_GROUP)
    }
}

/// A planned or executed rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRow {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub old_name: String,
    pub new_name: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error_message: String,
}

impl RenameRow {
    /// Build an unexecuted row; names are taken from the paths.
    pub fn planned(old_path: PathBuf, new_path: PathBuf) -> Self {
        Self {
            old_name: file_name_of(&old_path),
            new_name: file_name_of(&new_path),
            old_path,
            new_path,
            success: false,
            error_message: String::new(),
        }
    }

    /// Renaming a file onto itself.
    pub fn is_noop(&self) -> bool {
        self.old_path == self.new_path
    }

    /// The display collision flag: the target exists on disk and is not the
    /// file being renamed.
    pub fn collides(&self) -> bool {
        !self.is_noop() && self.new_path.exists()
    }

    pub(crate) fn mark_succeeded(&mut self) {
        self.success = true;
        self.error_message.clear();
    }

    pub(crate) fn mark_failed(&mut self, failure: &RowFailure) {
        self.success = false;
        self.error_message = failure.to_string();
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Why a single rename did not happen.
#[derive(Debug, thiserror::Error)]
pub enum RowFailure {
    #[error("file does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("permission denied: {} - file is in use or not writable", .0.display())]
    PermissionDenied(PathBuf),

    #[error("os error: {} - {source}", .path.display())]
    Os { path: PathBuf, source: io::Error },

    #[error("unexpected error: {} - {message}", .path.display())]
    Unexpected { path: PathBuf, message: String },
}

impl RowFailure {
    /// Classify an I/O error raised while renaming `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path)
        } else if err.raw_os_error().is_some() {
            Self::Os { path, source: err }
        } else {
            Self::Unexpected {
                path,
                message: err.to_string(),
            }
        }
    }
}

/// Outcome of a single row.
pub type RowOutcome = Result<(), RowFailure>;

/// Aggregate result of an execute or undo call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl BatchResult {
    pub(crate) fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            Ok(()) => self.success += 1,
            Err(failure) => {
                self.failed += 1;
                self.errors.push(failure.to_string());
            },
        }
    }

    /// A result carrying a single top-level error and no processed rows.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success: 0,
            failed: 0,
            errors: vec![message.into()],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }
}
