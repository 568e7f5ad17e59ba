use crate::apply::move_file;
use crate::history::UndoLog;
use crate::model::{BatchResult, RenameRow, RowFailure, RowOutcome};

/// Message reported when the log holds no transaction to reverse
pub const NO_UNDO_HISTORY: &str = "no undo history";

/// Reverse the most recent transaction recorded in `log`.
///
/// Rows are replayed newest first, renaming `new_path` back to `old_path`.
/// Rows that failed originally were never renamed and are skipped. The log
/// itself is left untouched, so calling this twice replays the same
/// transaction again.
pub fn undo(log: &UndoLog) -> BatchResult {
    let rows = match log.load_latest_transaction() {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(
                path = %log.path().display(),
                error = %format!("{e:#}"),
                "failed to read undo log"
            );
            return BatchResult::aborted(format!("failed to read undo log: {e}"));
        },
    };

    if rows.is_empty() {
        return BatchResult::aborted(NO_UNDO_HISTORY);
    }

    let mut result = BatchResult::default();
    for row in rows.iter().rev().filter(|row| row.success) {
        let outcome = revert_row(row);
        match &outcome {
            Ok(()) => tracing::info!(from = %row.new_name, to = %row.old_name, "restored"),
            Err(failure) => tracing::error!(error = %failure, "undo failed"),
        }
        result.record(&outcome);
    }

    result
}

fn revert_row(row: &RenameRow) -> RowOutcome {
    if !row.new_path.exists() {
        return Err(RowFailure::Missing(row.new_path.clone()));
    }

    if row.is_noop() {
        return Ok(());
    }

    move_file(&row.new_path, &row.old_path)
}
