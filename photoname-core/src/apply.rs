use crate::history::{is_recordable, UndoLog};
use crate::model::{BatchResult, RenameRow, RowFailure, RowOutcome};
use chrono::Local;
use std::fs;
use std::path::Path;

/// Perform the renames described by `rows`, in order, one at a time.
///
/// Each row's `success` and `error_message` are updated in place. A failing
/// row never stops the batch. When at least one row succeeded, every row
/// attempted here is appended to `log` as one transaction stamped with the
/// time this call started; a log write failure is reported through tracing
/// and does not change the returned counts.
pub fn execute(rows: &mut [RenameRow], log: &UndoLog) -> BatchResult {
    let started_at = Local::now();
    let mut result = BatchResult::default();

    for row in rows.iter_mut() {
        let outcome = rename_row(row);
        match &outcome {
            Ok(()) => {
                row.mark_succeeded();
                tracing::info!(from = %row.old_name, to = %row.new_name, "renamed");
            },
            Err(failure) => {
                row.mark_failed(failure);
                tracing::error!(error = %failure, "rename failed");
            },
        }
        result.record(&outcome);
    }

    if result.success > 0 {
        if let Err(e) = log.append(rows, &started_at) {
            tracing::error!(
                path = %log.path().display(),
                error = %format!("{e:#}"),
                "failed to record transaction in undo log"
            );
        }
    }

    result
}

/// Rename a single row's file. No-op rows succeed without touching the disk.
pub fn rename_row(row: &RenameRow) -> RowOutcome {
    if !row.old_path.exists() {
        return Err(RowFailure::Missing(row.old_path.clone()));
    }

    // A rename the log cannot hold could never be undone.
    if let Some(path) = [&row.old_path, &row.new_path]
        .into_iter()
        .find(|path| !is_recordable(path))
    {
        return Err(RowFailure::Unexpected {
            path: path.clone(),
            message: "path cannot be recorded in the undo log".to_string(),
        });
    }

    if row.is_noop() {
        tracing::debug!(path = %row.old_path.display(), "name unchanged, skipping");
        return Ok(());
    }

    move_file(&row.old_path, &row.new_path)
}

/// Move `from` to `to` without ever replacing an existing file.
pub(crate) fn move_file(from: &Path, to: &Path) -> RowOutcome {
    // fs::rename silently replaces on Unix; an overwritten file could not be restored.
    if to.exists() {
        return Err(RowFailure::DestinationExists(to.to_path_buf()));
    }

    fs::rename(from, to).map_err(|e| RowFailure::from_io(from, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_execute_renames_and_records() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.jpg");
        let log = UndoLog::in_dir(&temp_dir.path().join(".photoname"));

        let mut rows = vec![RenameRow::planned(a.clone(), temp_dir.path().join("x.jpg"))];
        let result = execute(&mut rows, &log);

        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 0);
        assert!(result.errors.is_empty());
        assert!(rows[0].success);
        assert!(!a.exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("x.jpg")).unwrap(),
            "a.jpg"
        );
        assert_eq!(log.load_latest_transaction().unwrap(), rows);
    }

    #[test]
    fn test_noop_row_succeeds_without_rename() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.jpg");
        let log = UndoLog::in_dir(temp_dir.path());

        let mut rows = vec![RenameRow::planned(a.clone(), a.clone())];
        let result = execute(&mut rows, &log);

        assert_eq!(result.success, 1);
        assert!(rows[0].success);
        assert!(a.exists());
    }

    #[test]
    fn test_missing_source_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.jpg");
        let c = touch(temp_dir.path(), "c.jpg");
        let gone = temp_dir.path().join("b.jpg");
        let log = UndoLog::in_dir(temp_dir.path());

        let mut rows = vec![
            RenameRow::planned(a, temp_dir.path().join("1.jpg")),
            RenameRow::planned(gone.clone(), temp_dir.path().join("2.jpg")),
            RenameRow::planned(c, temp_dir.path().join("3.jpg")),
        ];
        let result = execute(&mut rows, &log);

        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(
            result.errors,
            vec![format!("file does not exist: {}", gone.display())]
        );
        assert_eq!(rows[1].error_message, result.errors[0]);
        assert!(temp_dir.path().join("3.jpg").exists());
    }

    #[test]
    fn test_existing_destination_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.jpg");
        let late = touch(temp_dir.path(), "late.jpg");
        let log = UndoLog::in_dir(temp_dir.path());

        let mut rows = vec![RenameRow::planned(a.clone(), late.clone())];
        let result = execute(&mut rows, &log);

        assert_eq!(result.failed, 1);
        assert!(result.errors[0].starts_with("destination already exists"));
        assert_eq!(fs::read_to_string(&late).unwrap(), "late.jpg");
        assert!(a.exists());
    }

    #[test]
    fn test_nothing_logged_when_every_row_fails() {
        let temp_dir = TempDir::new().unwrap();
        let log = UndoLog::in_dir(&temp_dir.path().join("state"));

        let mut rows = vec![RenameRow::planned(
            temp_dir.path().join("gone.jpg"),
            temp_dir.path().join("x.jpg"),
        )];
        let result = execute(&mut rows, &log);

        assert_eq!(result.failed, 1);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_log_write_failure_does_not_fail_execute() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.jpg");
        // A directory where the log file should be makes the append fail.
        let log_path = temp_dir.path().join("log.csv");
        fs::create_dir(&log_path).unwrap();
        let log = UndoLog::new(&log_path);

        let mut rows = vec![RenameRow::planned(a, temp_dir.path().join("x.jpg"))];
        let result = execute(&mut rows, &log);

        assert_eq!(result.success, 1);
        assert!(result.is_clean());
        assert!(temp_dir.path().join("x.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_is_classified() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let a = touch(&locked, "a.jpg");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory permissions; nothing to check then.
        let write_check = locked.join(".write-check");
        if fs::write(&write_check, "").is_ok() {
            let _ = fs::remove_file(&write_check);
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let log = UndoLog::in_dir(temp_dir.path());
        let mut rows = vec![RenameRow::planned(a, locked.join("b.jpg"))];
        let result = execute(&mut rows, &log);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(result.failed, 1);
        assert!(result.errors[0].starts_with("permission denied"));
    }
}
