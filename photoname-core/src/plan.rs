use crate::history::format_timestamp;
use crate::model::RenameRow;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the saved plan inside the state directory
pub const PLAN_FILE_NAME: &str = "plan.json";

/// Rows produced by a preview, saved so `apply` executes exactly what was shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub created_at: String,
    pub template: String,
    pub rows: Vec<RenameRow>,
}

impl Plan {
    pub fn new(template: impl Into<String>, rows: Vec<RenameRow>) -> Self {
        Self {
            created_at: format_timestamp(&Local::now()),
            template: template.into(),
            rows,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!(
                "No plan found at {}. Run `photoname preview` first or pass the files to apply",
                path.display()
            ));
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan from {}", path.display()))?;
        let mut plan: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plan from {}", path.display()))?;

        for row in &mut plan.rows {
            row.success = false;
            row.error_message.clear();
        }
        Ok(plan)
    }

    /// Write the plan as JSON. Nothing is written if a row cannot be encoded.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize plan")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create plan directory: {}", parent.display())
            })?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write plan to {}", path.display()))?;
        Ok(())
    }
}
