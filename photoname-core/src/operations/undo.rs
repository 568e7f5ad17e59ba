use super::Workspace;
use crate::history::UndoLog;
use crate::lock::StateLock;
use crate::output::UndoResult;
use crate::undo::undo;
use anyhow::{Context, Result};
use std::path::Path;

/// High-level undo operation - equivalent to `photoname undo` command
pub fn undo_operation(working_dir: Option<&Path>) -> Result<UndoResult> {
    let workspace = Workspace::load(working_dir)?;
    let _lock = StateLock::acquire(&workspace.state_dir())
        .context("Failed to acquire lock for photoname operation")?;

    let log = UndoLog::new(workspace.log_path());
    Ok(UndoResult { result: undo(&log) })
}
