use super::Workspace;
use crate::history::UndoLog;
use crate::output::HistoryResult;
use anyhow::Result;
use std::path::Path;

/// History operation - lists recorded transactions, most recent first
pub fn history_operation(limit: Option<usize>, working_dir: Option<&Path>) -> Result<HistoryResult> {
    let workspace = Workspace::load(working_dir)?;
    let log = UndoLog::new(workspace.log_path());

    let mut transactions = log.transactions()?;
    if let Some(limit) = limit {
        transactions.truncate(limit);
    }

    Ok(HistoryResult {
        log_path: log.path().to_path_buf(),
        transactions,
    })
}
