use crate::history::TransactionSummary;
use crate::model::{BatchResult, RenameRow};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Result of a preview operation
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub template: String,
    pub rows: Vec<RenameRow>,
    /// Where the plan was saved for `apply`, if it could be saved
    pub plan_path: Option<PathBuf>,
}

/// Result of an apply operation
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    pub template: String,
    pub rows: Vec<RenameRow>,
    pub result: BatchResult,
    pub log_path: PathBuf,
}

/// Result of an undo operation
#[derive(Debug, Serialize)]
pub struct UndoResult {
    pub result: BatchResult,
}

/// Result of a history operation
#[derive(Debug, Serialize)]
pub struct HistoryResult {
    pub log_path: PathBuf,
    pub transactions: Vec<TransactionSummary>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

// Paths go through `to_string_lossy` so names that are not valid UTF-8 still render.
fn row_json(row: &RenameRow) -> Value {
    json!({
        "old_path": row.old_path.to_string_lossy(),
        "new_path": row.new_path.to_string_lossy(),
        "old_name": row.old_name,
        "new_name": row.new_name,
        "success": row.success,
        "error_message": row.error_message,
    })
}

fn write_errors(output: &mut String, result: &BatchResult) {
    for error in &result.errors {
        writeln!(output, "✗ {}", error).unwrap();
    }
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        let rows: Vec<_> = self
            .rows
            .iter()
            .map(|row| {
                let mut value = row_json(row);
                value["exists"] = json!(row.collides());
                value
            })
            .collect();

        serde_json::to_string(&json!({
            "operation": "preview",
            "template": self.template,
            "plan_path": self.plan_path.as_deref().map(Path::to_string_lossy),
            "rows": rows,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        let changes = self.rows.iter().filter(|row| !row.is_noop()).count();

        writeln!(output, "Template: {}", self.template).unwrap();
        writeln!(
            output,
            "Planned: {} files, {} renames",
            self.rows.len(),
            changes
        )
        .unwrap();
        if let Some(plan_path) = &self.plan_path {
            writeln!(output, "Plan saved to {}", plan_path.display()).unwrap();
            output.push_str("Apply with: photoname apply\n");
        }

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "operation": "apply",
            "success": self.result.success,
            "failed": self.result.failed,
            "errors": self.result.errors,
            "rows": self.rows.iter().map(row_json).collect::<Vec<_>>(),
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.rows.is_empty() {
            output.push_str("Nothing to rename\n");
            return output;
        }

        writeln!(output, "✓ Renamed {} files", self.result.success).unwrap();
        if self.result.failed > 0 {
            writeln!(output, "✗ Failed {} files", self.result.failed).unwrap();
        }
        write_errors(&mut output, &self.result);

        if self.result.success > 0 {
            writeln!(output, "Undo log: {}", self.log_path.display()).unwrap();
            output.push_str("Undo with: photoname undo\n");
        }

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "operation": "undo",
            "success": self.result.success,
            "failed": self.result.failed,
            "errors": self.result.errors,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.result.success > 0 {
            writeln!(output, "✓ Restored {} files", self.result.success).unwrap();
        }
        if self.result.failed > 0 {
            writeln!(output, "✗ Failed to restore {} files", self.result.failed).unwrap();
        }
        write_errors(&mut output, &self.result);

        output
    }
}

impl OutputFormatter for HistoryResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        use comfy_table::Table;

        if self.transactions.is_empty() {
            return "No renames recorded yet\n".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["Timestamp", "Files", "Renamed", "Undoable"]);
        for (idx, transaction) in self.transactions.iter().enumerate() {
            table.add_row(vec![
                transaction.timestamp.clone(),
                transaction.rows.to_string(),
                transaction.succeeded.to_string(),
                if idx == 0 { "yes" } else { "" }.to_string(),
            ]);
        }

        format!("{table}\n")
    }
}
